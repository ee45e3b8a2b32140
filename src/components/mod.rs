//! Reusable UI components

mod chat_input;
mod chat_message;
mod header;
mod loading;
mod sidebar;

pub use chat_input::ChatInput;
pub use chat_message::ChatMessage;
pub use header::Header;
pub use loading::{LoadingSpinner, TypingIndicator};
pub use sidebar::Sidebar;
