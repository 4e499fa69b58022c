//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `Client` builds `HttpRequest`
//! values and interprets `HttpResponse` values, while the injected
//! `Transport` performs the actual I/O. Authentication, timeouts and
//! connection reuse all live on the transport side of that line.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be recorded,
//! cloned and replayed in tests without lifetime concerns.

use std::fmt;

/// Error produced by a transport. Passed through to the caller unchanged.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Client::new_request` / `Client::new_json_request`. `url` is
/// absolute, already resolved against the configured base URL and carrying
/// any encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Executes one HTTP round trip.
///
/// Implementations must return non-2xx responses as `Ok` data; status
/// interpretation belongs to the client. Only failures to obtain a response
/// at all (DNS, connect, I/O) are `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "https://api.getbase.com/v2/deals".to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 300;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
    }
}
