//! Conversation list shown in the sidebar

use super::LoadState;
use crate::error::ClientError;
use crate::types::Conversation;

/// Title given to conversations created from the sidebar
pub const DEFAULT_TITLE: &str = "Новый чат";

const LOAD_FAILED: &str = "Ошибка загрузки чатов";
const CREATE_FAILED: &str = "Ошибка создания чата";
const DELETE_FAILED: &str = "Ошибка удаления чата";
const RENAME_FAILED: &str = "Ошибка переименования чата";

/// Tags a list fetch so a superseded result can be recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the active selection became after a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Unchanged,
    Selected(i64),
    /// Nothing left to show; go back to the conversation-list page
    Cleared,
}

/// A rename the server should apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCommit {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenameDraft {
    id: i64,
    value: String,
    pending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationList {
    conversations: Vec<Conversation>,
    selected: Option<i64>,
    load: LoadState,
    error: Option<String>,
    creating: bool,
    editing: Option<RenameDraft>,
    generation: u64,
}

impl ConversationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Inline error from the last failed operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    // ----- Loading -----

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns false if a newer load superseded it.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Conversation>, ClientError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("Dropping stale conversation list");
            return false;
        }
        match result {
            Ok(list) => {
                self.conversations = list;
                self.load = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to load conversations: {}", e);
                self.conversations.clear();
                self.load = LoadState::Error(LOAD_FAILED.to_string());
            }
        }
        true
    }

    // ----- Selection -----

    pub fn select(&mut self, id: i64) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ----- Create -----

    /// Returns false if a create is already in flight
    pub fn begin_create(&mut self) -> bool {
        if self.creating {
            return false;
        }
        self.creating = true;
        self.error = None;
        true
    }

    /// On success the new conversation goes to the head of the list and
    /// becomes the selection; its id is returned for navigation.
    pub fn finish_create(&mut self, result: Result<Conversation, ClientError>) -> Option<i64> {
        self.creating = false;
        match result {
            Ok(conversation) => {
                let id = conversation.id;
                self.conversations.insert(0, conversation);
                self.selected = Some(id);
                Some(id)
            }
            Err(e) => {
                tracing::error!("Failed to create conversation: {}", e);
                self.error = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }

    // ----- Delete -----

    pub fn finish_delete(&mut self, id: i64, result: Result<(), ClientError>) -> SelectionChange {
        if let Err(e) = result {
            tracing::error!("Failed to delete conversation {}: {}", id, e);
            self.error = Some(DELETE_FAILED.to_string());
            return SelectionChange::Unchanged;
        }

        self.error = None;
        self.conversations.retain(|c| c.id != id);
        if self.editing.as_ref().is_some_and(|d| d.id == id) {
            self.editing = None;
        }

        if self.conversations.is_empty() {
            self.selected = None;
            return SelectionChange::Cleared;
        }
        if self.selected == Some(id) {
            let next = self.conversations[0].id;
            self.selected = Some(next);
            return SelectionChange::Selected(next);
        }
        SelectionChange::Unchanged
    }

    // ----- Rename -----

    /// Conversation currently in edit mode
    pub fn editing_id(&self) -> Option<i64> {
        self.editing.as_ref().map(|d| d.id)
    }

    pub fn draft(&self) -> Option<&str> {
        self.editing.as_ref().map(|d| d.value.as_str())
    }

    pub fn is_renaming(&self) -> bool {
        self.editing.as_ref().is_some_and(|d| d.pending)
    }

    /// Enter edit mode with the current title as the draft
    pub fn start_edit(&mut self, id: i64) {
        if let Some(conversation) = self.conversations.iter().find(|c| c.id == id) {
            self.editing = Some(RenameDraft {
                id,
                value: conversation.title.clone(),
                pending: false,
            });
        }
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.value = value.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Confirm the draft. Empty or unchanged input leaves edit mode without
    /// a request; otherwise the trimmed title is returned for the API call.
    pub fn commit_edit(&mut self) -> Option<RenameCommit> {
        let draft = self.editing.as_mut()?;
        if draft.pending {
            return None;
        }

        let title = draft.value.trim().to_string();
        let current = self
            .conversations
            .iter()
            .find(|c| c.id == draft.id)
            .map(|c| c.title.as_str());

        if title.is_empty() || current.is_none() || current == Some(title.as_str()) {
            self.editing = None;
            return None;
        }

        draft.pending = true;
        Some(RenameCommit {
            id: draft.id,
            title,
        })
    }

    pub fn finish_rename(&mut self, commit: RenameCommit, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                if let Some(c) = self.conversations.iter_mut().find(|c| c.id == commit.id) {
                    c.title = commit.title;
                }
                if self.editing_id() == Some(commit.id) {
                    self.editing = None;
                }
            }
            Err(e) => {
                tracing::error!("Failed to rename conversation {}: {}", commit.id, e);
                self.error = Some(RENAME_FAILED.to_string());
                if let Some(draft) = self.editing.as_mut().filter(|d| d.id == commit.id) {
                    draft.pending = false;
                }
            }
        }
    }
}
