//! Error types for the client

/// Failure of a single API call.
///
/// The UI never distinguishes between these variants when talking to the
/// user; they exist so the logs say what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Input rejected before any request is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Введите email и пароль")]
    MissingCredentials,

    #[error("Заполните все поля")]
    MissingRegistrationFields,

    #[error("Сообщение не может быть пустым")]
    EmptyMessage,

    #[error("Чат не выбран")]
    NoConversation,
}
