//! Error types for the Base CRM client.
//!
//! # Design
//! Three families of failure reach the caller:
//! - local construction errors (`Url`, `Encode`, `MissingField`, `Config`),
//!   raised before anything is sent;
//! - transport errors, passed through unchanged from the injected transport;
//! - API errors: any non-2xx response, decoded from the `{"errors": [...]}`
//!   envelope when the body allows it.
//!
//! API and decode errors keep the raw `Response` so the caller can still
//! inspect status, headers and body.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::Response;
use crate::http::{HttpMethod, TransportError};

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL or a resource path failed to parse.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The operation needs a field the caller left unset.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Configuration could not be read from the environment.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transport failed to produce a response.
    #[error("transport error")]
    Transport(#[source] TransportError),

    /// A 2xx response body could not be decoded into the expected type.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<Response>,
    },

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(Box<ErrorResponse>),
}

impl Error {
    /// The raw response behind this error, when one was received.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api(err) => Some(&err.response),
            Error::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status of the response behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }
}

/// A non-2xx response together with its decoded error envelope.
#[derive(Debug)]
pub struct ErrorResponse {
    pub method: HttpMethod,
    pub url: String,
    pub response: Response,
    /// `None` when the body was empty or not a valid error envelope.
    pub errors: Option<ErrorsEnvelope>,
}

impl ErrorResponse {
    /// The first error detail of the envelope, if any.
    pub fn first_error(&self) -> Option<&ApiErrorDetail> {
        self.errors
            .as_ref()
            .and_then(|envelope| envelope.errors.first())
            .map(|item| &item.error)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.method, self.url, self.response.status())?;
        if let Some(envelope) = &self.errors {
            write!(f, " {envelope}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}

/// Link to documentation that may help resolve an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

/// A single error as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// The resource the error relates to.
    #[serde(default)]
    pub resource: Option<String>,
    /// The field of the resource the error relates to.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Human readable description, localized per `Content-Language`.
    #[serde(default)]
    pub message: Option<String>,
    /// Developer-facing description, always in English.
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItemMeta {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub links: Option<ErrorLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub error: ApiErrorDetail,
    #[serde(default)]
    pub meta: Option<ErrorItemMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsMeta {
    /// Always `errors`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Status code plus reason phrase, e.g. `422 Unprocessable Entity`.
    #[serde(default)]
    pub http_status: Option<String>,
    /// Request id, same as the `X-Request-Id` response header.
    #[serde(default)]
    pub logref: Option<String>,
    #[serde(default)]
    pub links: Option<ErrorLinks>,
}

/// The `{"errors": [...], "meta": {...}}` envelope of a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsEnvelope {
    pub errors: Vec<ErrorItem>,
    #[serde(default)]
    pub meta: Option<ErrorsMeta>,
}

impl ErrorsEnvelope {
    pub fn logref(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|meta| meta.logref.as_deref())
    }
}

impl fmt::Display for ErrorsEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let logref = self.logref().unwrap_or_default();
        let Some(item) = self.errors.first() else {
            return write!(f, "no error details, logref={logref}");
        };
        let err = &item.error;
        write!(
            f,
            "resource={}, field={}, code={}, message={}, details={}, logref={}",
            err.resource.as_deref().unwrap_or_default(),
            err.field.as_deref().unwrap_or_default(),
            err.code.as_deref().unwrap_or_default(),
            err.message.as_deref().unwrap_or_default(),
            err.details.as_deref().unwrap_or_default(),
            logref,
        )
    }
}

impl std::error::Error for ErrorsEnvelope {}
