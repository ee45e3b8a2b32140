//! HTTP transport used by the API client

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single outgoing request, path relative to the API base
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status plus the body as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One request/response exchange. No retries, no timeouts of its own.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `fetch`-backed transport for the browser
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    config: ClientConfig,
}

impl BrowserTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.config.url(&request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        let builder = match &request.authorization {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        };

        let resp = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ClientError::Encode(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        let body = read_body(resp.text().await)?;
        Ok(HttpResponse { status, body })
    }
}

/// A body that cannot be read is a transport failure, not an empty body
fn read_body(text: std::result::Result<String, gloo_net::Error>) -> Result<String> {
    text.map_err(|e| ClientError::Network(format!("Failed to read response body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_body_is_a_network_error() {
        let err = read_body(Err(gloo_net::Error::GlooError("stream closed".into()))).unwrap_err();
        assert!(matches!(err, ClientError::Network(ref msg) if msg.contains("stream closed")));

        assert_eq!(read_body(Ok("{}".into())), Ok("{}".to_string()));
    }

    #[test]
    fn ok_covers_only_2xx() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(302, "").ok());
        assert!(!HttpResponse::new(401, "").ok());
    }
}
