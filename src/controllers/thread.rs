//! Message thread of the active conversation

use chrono::Utc;

use super::LoadState;
use crate::error::{ClientError, ValidationError};
use crate::types::{ChatReply, Message};

const LOAD_FAILED: &str = "Ошибка загрузки сообщений";
const SEND_FAILED: &str = "Ошибка отправки сообщения";

/// What happens to the optimistic user message when a send fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimisticPolicy {
    /// The message stays in the thread
    #[default]
    Keep,
    /// The message is removed again
    Rollback,
}

/// Tags a history fetch with the view it was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadTicket {
    generation: u64,
    pub conversation_id: i64,
}

/// An accepted send, to be completed with the server's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    generation: u64,
    local_id: i64,
    pub conversation_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageThread {
    conversation_id: Option<i64>,
    messages: Vec<Message>,
    load: LoadState,
    error: Option<String>,
    sending: bool,
    policy: OptimisticPolicy,
    generation: u64,
    last_local_id: i64,
}

impl MessageThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: OptimisticPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The input stays disabled while this is true
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Switch to another conversation.
    ///
    /// Everything in flight for the previous one is orphaned. Returns the
    /// ticket for the history fetch, or `None` when there is nothing valid
    /// to load.
    pub fn open(&mut self, conversation_id: Option<i64>) -> Option<ThreadTicket> {
        self.generation += 1;
        self.messages.clear();
        self.error = None;
        self.sending = false;

        match conversation_id.filter(|id| *id > 0) {
            Some(id) => {
                self.conversation_id = Some(id);
                self.load = LoadState::Loading;
                Some(ThreadTicket {
                    generation: self.generation,
                    conversation_id: id,
                })
            }
            None => {
                self.conversation_id = None;
                self.load = LoadState::Ready;
                None
            }
        }
    }

    /// Apply a history fetch. Returns false if the view has moved on.
    pub fn finish_load(
        &mut self,
        ticket: ThreadTicket,
        result: Result<Vec<Message>, ClientError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale history for conversation {}",
                ticket.conversation_id
            );
            return false;
        }
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.load = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load messages for conversation {}: {}",
                    ticket.conversation_id,
                    e
                );
                self.load = LoadState::Error(LOAD_FAILED.to_string());
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        true
    }

    /// Validate the input and append it as an optimistic user message
    pub fn begin_send(&mut self, text: &str) -> Result<SendTicket, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let conversation_id = self.conversation_id.ok_or(ValidationError::NoConversation)?;

        let local_id = self.next_local_id();
        self.messages.push(Message::user(local_id, text));
        self.sending = true;
        self.error = None;

        Ok(SendTicket {
            generation: self.generation,
            local_id,
            conversation_id,
            text: text.to_string(),
        })
    }

    /// Apply the server's answer. Returns false if the view has moved on.
    pub fn finish_send(&mut self, ticket: SendTicket, result: Result<ChatReply, ClientError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale reply for conversation {}",
                ticket.conversation_id
            );
            return false;
        }
        self.sending = false;

        match result {
            Ok(reply) => {
                let id = self.next_local_id();
                self.messages.push(Message::assistant(id, reply));
            }
            Err(e) => {
                tracing::error!(
                    "Failed to send message to conversation {}: {}",
                    ticket.conversation_id,
                    e
                );
                if self.policy == OptimisticPolicy::Rollback {
                    self.messages.retain(|m| m.id != ticket.local_id);
                }
                self.error = Some(SEND_FAILED.to_string());
            }
        }
        true
    }

    /// Clock-based id, strictly increasing within this thread. Only unique
    /// enough for list keys; it is not what the server will assign.
    fn next_local_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_local_id = now.max(self.last_local_id + 1);
        self.last_local_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            message: text.to_string(),
            timestamp: None,
        }
    }

    fn opened(id: i64) -> MessageThread {
        let mut thread = MessageThread::new();
        let ticket = thread.open(Some(id)).unwrap();
        thread.finish_load(ticket, Ok(vec![]));
        thread
    }

    #[test]
    fn open_starts_loading() {
        let mut thread = MessageThread::new();
        let ticket = thread.open(Some(5)).unwrap();

        assert_eq!(ticket.conversation_id, 5);
        assert!(thread.load_state().is_loading());
    }

    #[test]
    fn open_without_valid_id_is_ready_and_empty() {
        let mut thread = MessageThread::new();
        assert!(thread.open(None).is_none());
        assert!(thread.open(Some(0)).is_none());
        assert_eq!(thread.load_state(), &LoadState::Ready);
    }

    #[test]
    fn failed_load_reports_inline_error() {
        let mut thread = MessageThread::new();
        let ticket = thread.open(Some(5)).unwrap();
        thread.finish_load(ticket, Err(ClientError::Network("offline".into())));

        assert!(thread.messages().is_empty());
        assert_eq!(thread.error(), Some(LOAD_FAILED));
        assert_eq!(thread.load_state().error(), Some(LOAD_FAILED));
    }

    #[test]
    fn history_for_previous_conversation_is_dropped() {
        let mut thread = MessageThread::new();
        let first = thread.open(Some(1)).unwrap();
        let second = thread.open(Some(2)).unwrap();

        let old = vec![Message::user(1, "old")];
        assert!(!thread.finish_load(first, Ok(old)));
        assert!(thread.load_state().is_loading());

        assert!(thread.finish_load(second, Ok(vec![])));
        assert_eq!(thread.conversation_id(), Some(2));
    }

    #[test]
    fn send_appends_user_then_assistant() {
        let mut thread = opened(5);

        let ticket = thread.begin_send("hi").unwrap();
        assert_eq!(ticket.conversation_id, 5);
        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].content, "hi");
        assert_eq!(thread.messages()[0].role, MessageRole::User);
        assert!(thread.is_sending());

        thread.finish_send(ticket, Ok(reply("hello")));
        assert_eq!(thread.messages().len(), 2);
        assert_eq!(thread.messages()[1].content, "hello");
        assert_eq!(thread.messages()[1].role, MessageRole::Assistant);
        assert!(!thread.is_sending());
    }

    #[test]
    fn failed_send_keeps_user_message() {
        let mut thread = opened(5);
        let ticket = thread.begin_send("hi").unwrap();

        thread.finish_send(ticket, Err(ClientError::Network("offline".into())));

        assert_eq!(thread.messages().len(), 1);
        assert!(thread.messages()[0].is_user());
        assert_eq!(thread.error(), Some(SEND_FAILED));
        assert!(!thread.is_sending());
    }

    #[test]
    fn rollback_policy_removes_user_message() {
        let mut thread = MessageThread::with_policy(OptimisticPolicy::Rollback);
        let load = thread.open(Some(5)).unwrap();
        thread.finish_load(load, Ok(vec![Message::user(1, "earlier")]));

        let ticket = thread.begin_send("hi").unwrap();
        thread.finish_send(ticket, Err(ClientError::Network("offline".into())));

        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].content, "earlier");
    }

    #[test]
    fn blank_text_and_missing_conversation_are_rejected() {
        let mut thread = opened(5);
        assert_eq!(thread.begin_send("   "), Err(ValidationError::EmptyMessage));
        assert!(thread.messages().is_empty());

        let mut idle = MessageThread::new();
        idle.open(None);
        assert_eq!(idle.begin_send("hi"), Err(ValidationError::NoConversation));
    }

    #[test]
    fn reply_after_switching_conversation_is_dropped() {
        let mut thread = opened(5);
        let ticket = thread.begin_send("hi").unwrap();

        thread.open(Some(6));
        assert!(!thread.is_sending());
        assert!(!thread.finish_send(ticket, Ok(reply("late"))));
        assert!(thread.messages().is_empty());
    }

    #[test]
    fn local_ids_are_unique() {
        let mut thread = opened(5);
        let a = thread.begin_send("one").unwrap();
        let b = thread.begin_send("two").unwrap();

        assert!(b.local_id > a.local_id);
        thread.finish_send(b, Ok(reply("r")));
        let ids: Vec<i64> = thread.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
