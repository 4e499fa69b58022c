//! Request building, dispatch and response checking for the Base API.
//!
//! # Design
//! `Client` holds only its `Config` and the injected `Transport`; it carries
//! no mutable state between calls. Building a request (`new_request`,
//! `new_json_request`) is pure and never touches the network, `send` hands
//! the request to the transport and maps non-2xx statuses to
//! `Error::Api`, and `decode` turns a successful body into a typed value.
//! Resource services compose these three steps.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::envelope::Meta;
use crate::error::{Error, ErrorResponse, ErrorsEnvelope};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::service::Service;
use crate::types::{Account, Contact, Deal, Lead, LossReason, Note, Source, Tag, Task, User};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.getbase.com/";

/// Default `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("basecrm-rs/", env!("CARGO_PKG_VERSION"));

const MEDIA_TYPE: &str = "application/json";

const BASE_URL_ENV: &str = "BASECRM_BASE_URL";
const USER_AGENT_ENV: &str = "BASECRM_USER_AGENT";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
    user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `BASECRM_BASE_URL` and `BASECRM_USER_AGENT`
    /// when those are set.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config
                .with_base_url(&base_url)
                .map_err(|e| Error::Config(format!("{BASE_URL_ENV}: {e}")))?;
        }
        if let Ok(user_agent) = std::env::var(USER_AGENT_ENV) {
            config = config.with_user_agent(user_agent);
        }
        Ok(config)
    }

    /// Points the client at another host, e.g. the sandbox or a mock server.
    ///
    /// A trailing `/` is added so relative resource paths resolve below any
    /// path prefix of `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = Url::parse(&base_url)?;
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// A response received from the API together with its envelope metadata.
///
/// Returned next to every successful result and kept inside API errors, so
/// callers can always look at the status code, headers and raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub raw: HttpResponse,
    /// Envelope `meta` of the decoded body; `None` for bodiless responses.
    pub meta: Option<Meta>,
}

impl Response {
    pub fn new(raw: HttpResponse) -> Self {
        Self { raw, meta: None }
    }

    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn is_no_content(&self) -> bool {
        self.raw.status == 204
    }
}

/// Synchronous, stateless client for the Base API v2.
pub struct Client<T> {
    config: Config,
    transport: T,
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Client<T> {
    /// Client against the production API with the default user agent.
    pub fn new(transport: T) -> Self {
        Self::with_config(Config::default(), transport)
    }

    pub fn with_config(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds a bodiless request for `path`, resolved against the base URL.
    pub fn new_request(&self, method: HttpMethod, path: &str) -> Result<HttpRequest, Error> {
        let url = self.config.base_url.join(path)?;
        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                ("accept".to_string(), MEDIA_TYPE.to_string()),
                ("user-agent".to_string(), self.config.user_agent.clone()),
            ],
            body: None,
        })
    }

    /// Builds a request for `path` carrying `body` encoded as JSON.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, Error> {
        let mut request = self.new_request(method, path)?;
        request.body = Some(serde_json::to_string(body).map_err(Error::Encode)?);
        request
            .headers
            .push(("content-type".to_string(), MEDIA_TYPE.to_string()));
        Ok(request)
    }

    /// Executes `request` through the transport.
    ///
    /// Any status outside 200-299 becomes `Error::Api`, which still carries
    /// the response.
    pub fn send(&self, request: &HttpRequest) -> Result<Response, Error> {
        log::debug!("{} {}", request.method, request.url);
        let raw = self.transport.execute(request).map_err(Error::Transport)?;
        log::trace!("{} {} -> {}", request.method, request.url, raw.status);
        check_response(request, Response::new(raw))
    }

    pub fn accounts(&self) -> Service<'_, Account, T> {
        Service::new(self)
    }

    pub fn users(&self) -> Service<'_, User, T> {
        Service::new(self)
    }

    pub fn contacts(&self) -> Service<'_, Contact, T> {
        Service::new(self)
    }

    pub fn leads(&self) -> Service<'_, Lead, T> {
        Service::new(self)
    }

    pub fn deals(&self) -> Service<'_, Deal, T> {
        Service::new(self)
    }

    pub fn sources(&self) -> Service<'_, Source, T> {
        Service::new(self)
    }

    pub fn loss_reasons(&self) -> Service<'_, LossReason, T> {
        Service::new(self)
    }

    pub fn notes(&self) -> Service<'_, Note, T> {
        Service::new(self)
    }

    pub fn tasks(&self) -> Service<'_, Task, T> {
        Service::new(self)
    }

    pub fn tags(&self) -> Service<'_, Tag, T> {
        Service::new(self)
    }
}

/// Decodes the body of a successful `response`.
pub fn decode<D: DeserializeOwned>(response: Response) -> Result<(D, Response), Error> {
    match serde_json::from_str(&response.raw.body) {
        Ok(value) => Ok((value, response)),
        Err(source) => Err(Error::Decode {
            source,
            response: Box::new(response),
        }),
    }
}

/// Map non-success status codes to `Error::Api`.
fn check_response(request: &HttpRequest, response: Response) -> Result<Response, Error> {
    if response.raw.is_success() {
        return Ok(response);
    }
    let errors = if response.raw.body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<ErrorsEnvelope>(&response.raw.body).ok()
    };
    let err = ErrorResponse {
        method: request.method,
        url: request.url.clone(),
        response,
        errors,
    };
    log::warn!("{err}");
    Err(Error::Api(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Recorder, Unreachable};

    #[test]
    fn new_request_resolves_against_default_base() {
        let req = testing::client(200, "{}")
            .new_request(HttpMethod::Get, "v2/deals/1")
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.getbase.com/v2/deals/1");
        assert!(req.body.is_none());
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("user-agent"), Some(USER_AGENT));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn json_request_sets_body_and_content_type() {
        let body = serde_json::json!({"data": {"name": "Website redesign"}});
        let req = testing::client(200, "{}")
            .new_json_request(HttpMethod::Post, "v2/deals", &body)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some("application/json"));
        let sent: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn base_url_prefix_is_kept() {
        let config = Config::default()
            .with_base_url("http://localhost:3000/sandbox")
            .unwrap();
        let client = Client::with_config(config, Recorder::new(200, "{}"));
        let req = client.new_request(HttpMethod::Get, "v2/users/self").unwrap();
        assert_eq!(req.url, "http://localhost:3000/sandbox/v2/users/self");
    }

    #[test]
    fn custom_user_agent_is_sent() {
        let config = Config::default().with_user_agent("acme-sync/2.0");
        let client = Client::with_config(config, Recorder::new(200, "{}"));
        let req = client.new_request(HttpMethod::Get, "v2/deals").unwrap();
        assert_eq!(req.header("user-agent"), Some("acme-sync/2.0"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Config::default().with_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn send_passes_request_to_transport() {
        let client = testing::client(200, "{}");
        let req = client.new_request(HttpMethod::Delete, "v2/tags/3").unwrap();
        let response = client.send(&req).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(client.transport().only_request(), req);
    }

    #[test]
    fn send_maps_non_2xx_to_api_error() {
        let client = testing::client(
            404,
            r#"{"errors":[{"error":{"resource":"deal","code":"not_found","message":"not found"}}],"meta":{"type":"errors","logref":"r1"}}"#,
        );
        let req = client.new_request(HttpMethod::Get, "v2/deals/9").unwrap();
        let err = client.send(&req).unwrap_err();
        let Error::Api(api) = &err else {
            panic!("expected Api error, got {err:?}");
        };
        assert_eq!(api.method, HttpMethod::Get);
        assert_eq!(api.url, "https://api.getbase.com/v2/deals/9");
        assert_eq!(api.first_error().unwrap().code.as_deref(), Some("not_found"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn send_with_empty_error_body_has_no_envelope() {
        let client = testing::client(500, "");
        let req = client.new_request(HttpMethod::Get, "v2/deals").unwrap();
        match client.send(&req).unwrap_err() {
            Error::Api(api) => {
                assert!(api.errors.is_none());
                assert_eq!(api.response.status(), 500);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_passes_through() {
        let client = Client::new(Unreachable);
        let req = client.new_request(HttpMethod::Get, "v2/deals").unwrap();
        let err = client.send(&req).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.to_string(), "transport error");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
        assert!(err.response().is_none());
    }

    #[test]
    fn decode_failure_keeps_response() {
        let response = Response::new(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        });
        let err = decode::<serde_json::Value>(response).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.response().unwrap().raw.body, "not json");
    }

    #[test]
    fn config_from_env_reads_overrides() {
        let _guard = testing::env_lock();
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(USER_AGENT_ENV);
        assert_eq!(Config::from_env().unwrap(), Config::default());

        std::env::set_var(BASE_URL_ENV, "http://localhost:3000/sandbox");
        std::env::set_var(USER_AGENT_ENV, "acme-sync/2.0");
        let config = Config::from_env();
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(USER_AGENT_ENV);

        let config = config.unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:3000/sandbox/");
        assert_eq!(config.user_agent(), "acme-sync/2.0");
    }

    #[test]
    fn config_from_env_rejects_invalid_base_url() {
        let _guard = testing::env_lock();
        std::env::set_var(BASE_URL_ENV, "not a url");
        let result = Config::from_env();
        std::env::remove_var(BASE_URL_ENV);

        match result {
            Err(Error::Config(message)) => assert!(message.starts_with(BASE_URL_ENV), "{message}"),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
