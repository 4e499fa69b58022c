//! Bundled transports.
//!
//! `UreqTransport` executes requests over blocking HTTP with `ureq`.
//! `BearerAuth` decorates any transport with an `Authorization` header;
//! obtaining the token is left to the caller.

use std::fmt;

use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

const TOKEN_ENV: &str = "BASECRM_TOKEN";

/// Adds `Authorization: Bearer <token>` to every request before delegating
/// to `inner`.
#[derive(Clone)]
pub struct BearerAuth<T> {
    token: String,
    inner: T,
}

impl<T> BearerAuth<T> {
    pub fn new(token: impl Into<String>, inner: T) -> Self {
        Self {
            token: token.into(),
            inner,
        }
    }

    /// Reads the access token from `BASECRM_TOKEN`.
    pub fn from_env(inner: T) -> Result<Self, Error> {
        match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim(), inner)),
            _ => Err(Error::Config(format!(
                "{TOKEN_ENV} is not set; provide a personal access token"
            ))),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for BearerAuth<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Transport for BearerAuth<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut request = request.clone();
        request
            .headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        request
            .headers
            .push(("authorization".to_string(), format!("Bearer {}", self.token)));
        self.inner.execute(&request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use ureq::Agent;

    use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

    /// Blocking transport over a shared `ureq::Agent`.
    ///
    /// Clones share the agent's connection pool.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Uses a preconfigured agent (timeouts, proxy, TLS).
        ///
        /// The agent must be built with `http_status_as_error(false)`, or
        /// every non-2xx response turns into a transport error instead of an
        /// API error.
        pub fn from_agent(agent: Agent) -> Self {
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let url = request.url.as_str();
            let mut response = match (request.method, request.body.as_deref()) {
                (HttpMethod::Get, _) => with_headers(self.agent.get(url), request).call()?,
                (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), request).call()?,
                (HttpMethod::Post, Some(body)) => {
                    with_headers(self.agent.post(url), request).send(body.as_bytes())?
                }
                (HttpMethod::Post, None) => with_headers(self.agent.post(url), request).send_empty()?,
                (HttpMethod::Put, Some(body)) => {
                    with_headers(self.agent.put(url), request).send(body.as_bytes())?
                }
                (HttpMethod::Put, None) => with_headers(self.agent.put(url), request).send_empty()?,
            };

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.body_mut().read_to_string()?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn with_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        request: &HttpRequest,
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}
