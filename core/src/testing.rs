//! Transport doubles shared by the unit tests.

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard};

use crate::client::Client;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Answers every request with one canned response and records what it saw.
pub(crate) struct Recorder {
    response: HttpResponse,
    seen: RefCell<Vec<HttpRequest>>,
}

impl Recorder {
    pub(crate) fn new(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            },
            seen: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.borrow().clone()
    }

    /// The single request seen so far.
    pub(crate) fn only_request(&self) -> HttpRequest {
        let seen = self.seen.borrow();
        assert_eq!(seen.len(), 1, "expected exactly one request, saw {seen:?}");
        seen[0].clone()
    }
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        Ok(self.response.clone())
    }
}

/// Client against the default base URL answering with `status` and `body`.
pub(crate) fn client(status: u16, body: &str) -> Client<Recorder> {
    Client::new(Recorder::new(status, body))
}

/// Fails every request as if the host were unreachable.
pub(crate) struct Unreachable;

impl Transport for Unreachable {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err("connection refused".into())
    }
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that read or write process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
