//! API types matching the meChat server

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateConversationRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameConversationRequest {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteConversationRequest {
    pub id: i64,
}

/// Chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub conversation_id: i64,
    pub message: String,
}

/// Assistant reply to a chat request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Error response from API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// A named thread of messages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Conversation {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

impl Conversation {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Letter shown in the sidebar avatar
    pub fn initial(&self) -> String {
        self.title
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "C".to_string())
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: i64,
    pub content: String,
    pub role: MessageRole,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn user(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role: MessageRole::User,
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(id: i64, reply: ChatReply) -> Self {
        Self {
            id,
            content: reply.message,
            role: MessageRole::Assistant,
            timestamp: reply.timestamp.or_else(|| Some(Utc::now())),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// The server stores ids as integers but may encode them as strings
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// RFC 3339 timestamp, or `None` when missing or unparseable
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_id_accepts_numeric_string() {
        let msg: Message = serde_json::from_value(json!({
            "id": "42",
            "conversation_id": 5,
            "content": "hi",
            "role": "user",
            "timestamp": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(msg.id, 42);
        assert!(msg.is_user());
        assert!(msg.timestamp.is_some());
    }

    #[test]
    fn bad_timestamp_does_not_reject_reply() {
        let reply: ChatReply =
            serde_json::from_value(json!({ "message": "hello", "timestamp": "yesterday" }))
                .unwrap();

        assert_eq!(reply.message, "hello");
        assert_eq!(reply.timestamp, None);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: std::result::Result<Message, _> =
            serde_json::from_value(json!({ "id": 1, "content": "x", "role": "system" }));
        assert!(result.is_err());
    }

    #[test]
    fn conversation_initial_falls_back_for_empty_title() {
        assert_eq!(Conversation::new(1, "новый").initial(), "Н");
        assert_eq!(Conversation::new(2, "").initial(), "C");
    }
}
