//! Mock transport for testing.
//!
//! Records every request the client makes and answers from a queue, so
//! tests can drive the API client and the controllers without a server.

use async_trait::async_trait;
use mechat_ui::error::{ClientError, Result};
use mechat_ui::transport::{HttpRequest, HttpResponse, Transport};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock transport with scripted responses.
///
/// Responses are consumed in order. Once the queue is empty every request
/// fails with a network error. Clones share the queue and the request log.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport-level failure
    pub fn fail(&self) -> &Self {
        self.responses
            .lock()
            .push_back(Err(ClientError::Network("connection refused".to_string())));
        self
    }

    /// Everything sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted response".to_string())))
    }
}
