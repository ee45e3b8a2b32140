//! API client for communicating with the meChat server

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result};
use crate::session::AuthHeader;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::*;

/// Typed wrappers over the REST endpoints.
///
/// Every call picks up the session's current `Authorization` header, so a
/// login or logout takes effect on the next request without rebuilding
/// the client.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    auth: AuthHeader,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, auth: AuthHeader) -> Self {
        Self { transport, auth }
    }

    /// Send a request and reject anything outside 2xx
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            path: path.to_string(),
            authorization: self.auth.value(),
            body,
        };

        let resp = self.transport.send(request).await?;
        if !resp.ok() {
            let message = match serde_json::from_str::<ApiErrorBody>(&resp.body) {
                Ok(err) => err.error,
                Err(_) => resp.body.trim().to_string(),
            };
            tracing::warn!("{} {} failed with status {}", method_name(method), path, resp.status);
            return Err(ClientError::Status {
                status: resp.status,
                message,
            });
        }
        Ok(resp)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpResponse> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.execute(Method::Post, path, Some(body)).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let resp = self.post(path, body).await?;
        decode(&resp.body)
    }

    /// GET a JSON array, degrading to an empty list on a malformed body
    async fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>> {
        let resp = self.execute(Method::Get, path, None).await?;
        Ok(decode_list(path, &resp.body))
    }

    /// Login, returning the session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post_json("/api/auth/login", &body).await?;
        non_empty_token(auth)
    }

    /// Register a new user, returning the session token
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<String> {
        let body = RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post_json("/api/auth/register", &body).await?;
        non_empty_token(auth)
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.get_list("/api/conversations").await
    }

    pub async fn create_conversation(&self, title: &str) -> Result<Conversation> {
        let body = CreateConversationRequest {
            title: title.to_string(),
        };
        self.post_json("/api/conversations/create", &body).await
    }

    pub async fn rename_conversation(&self, id: i64, title: &str) -> Result<()> {
        let body = RenameConversationRequest {
            id,
            title: title.to_string(),
        };
        self.post("/api/conversations/rename", &body).await?;
        Ok(())
    }

    pub async fn delete_conversation(&self, id: i64) -> Result<()> {
        self.post("/api/conversations/delete", &DeleteConversationRequest { id })
            .await?;
        Ok(())
    }

    /// Full message history of a conversation, oldest first
    pub async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>> {
        self.get_list(&format!("/api/messages?conversation_id={}", conversation_id))
            .await
    }

    /// Send a chat message and wait for the assistant's reply
    pub async fn send_message(&self, conversation_id: i64, text: &str) -> Result<ChatReply> {
        let body = ChatRequest {
            conversation_id,
            message: text.to_string(),
        };
        self.post_json("/api/chat", &body).await
    }
}

fn method_name(method: Method) -> &'static str {
    match method {
        Method::Get => "GET",
        Method::Post => "POST",
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn non_empty_token(auth: AuthResponse) -> Result<String> {
    if auth.token.is_empty() {
        return Err(ClientError::Decode("response carried no token".to_string()));
    }
    Ok(auth.token)
}

/// Lenient list decoding: `null`, an empty body or a non-array yields an
/// empty list, and items that fail to parse are skipped.
fn decode_list<R: DeserializeOwned>(path: &str, body: &str) -> Vec<R> {
    if body.trim().is_empty() {
        return vec![];
    }
    let items = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(serde_json::Value::Null) => return vec![],
        Ok(_) => {
            tracing::warn!("Expected a list from {}, got another JSON value", path);
            return vec![];
        }
        Err(e) => {
            tracing::warn!("Failed to parse list from {}: {}", path, e);
            return vec![];
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Skipping malformed item from {}: {}", path, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_list_tolerates_null_and_garbage() {
        assert!(decode_list::<Conversation>("/x", "null").is_empty());
        assert!(decode_list::<Conversation>("/x", "").is_empty());
        assert!(decode_list::<Conversation>("/x", "{\"id\":1}").is_empty());
        assert!(decode_list::<Conversation>("/x", "<html>").is_empty());
    }

    #[test]
    fn decode_list_skips_bad_items() {
        let body = r#"[{"id":1,"title":"A"},{"title":"no id"},{"id":"3","title":"C"}]"#;
        let list: Vec<Conversation> = decode_list("/api/conversations", body);
        assert_eq!(
            list,
            vec![Conversation::new(1, "A"), Conversation::new(3, "C")]
        );
    }

    #[test]
    fn empty_token_is_a_decode_error() {
        let err = non_empty_token(AuthResponse {
            token: String::new(),
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
