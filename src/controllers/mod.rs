//! View state machines
//!
//! Each controller is plain data plus transitions. Pages keep one inside a
//! signal, start a transition before an API call and finish it with the
//! result; the controller decides whether a late result still applies.

pub mod auth;
pub mod conversations;
pub mod thread;

pub use auth::{AuthError, LoginForm, RegisterForm, Submission};
pub use conversations::{ConversationList, RenameCommit, SelectionChange, DEFAULT_TITLE};
pub use thread::{MessageThread, OptimisticPolicy, SendTicket, ThreadTicket};

/// Progress of a fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
