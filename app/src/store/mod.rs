//! In-memory chat state and the transitions that update it.
//!
//! `ChatStore` owns every collection the presentation layer observes: users,
//! chats in display order, one message thread per chat, favorites, the theme,
//! the selected chat and the panel visibility flags. Every transition takes
//! `&mut self` and returns a `Result`, so a single owner serializes all
//! mutations and callers can assert on missing references instead of having
//! them silently ignored.

mod chats;
mod messages;
mod panels;

pub use chats::NewChat;
pub use panels::{Panel, Panels};

use chrono::{DateTime, Utc};
use mockchat_messaging::{Chat, ChatId, Message, MessageId, ModelError, Theme, User, UserId};
use mockchat_mockdata::MockData;
use serde::Serialize;
use std::collections::HashMap;

/// Errors returned by store transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("chat not found: {0}")]
    ChatNotFound(ChatId),
    #[error("message {message} not found in chat {chat}")]
    MessageNotFound { chat: ChatId, message: MessageId },
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ChatNotFound(_)
                | StoreError::MessageNotFound { .. }
                | StoreError::UserNotFound(_)
        )
    }
}

impl From<ModelError> for StoreError {
    fn from(err: ModelError) -> Self {
        StoreError::InvalidOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Hands out millisecond-timestamp ids that never repeat within a store.
#[derive(Debug, Clone, Default)]
struct IdAllocator {
    last_ms: i64,
}

impl IdAllocator {
    fn next(&mut self, now: DateTime<Utc>) -> String {
        let ms = now.timestamp_millis().max(self.last_ms + 1);
        self.last_ms = ms;
        ms.to_string()
    }
}

/// Follow-up work a transition leaves for the session that owns the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A local message landed in a direct chat; the peer should answer.
    PeerReply(ChatId),
    /// The chat is gone; its pending replies must not fire.
    CancelReplies(ChatId),
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStore {
    users: Vec<User>,
    chats: Vec<Chat>,
    messages: HashMap<ChatId, Vec<Message>>,
    favorites: Vec<Message>,
    theme: Theme,
    selected: Option<ChatId>,
    panels: Panels,
    #[serde(skip)]
    ids: IdAllocator,
    /// Insertion rank per chat; ties among pinned/unpinned chats sort by it
    #[serde(skip)]
    ranks: HashMap<ChatId, i64>,
    /// Replies the simulated peer still owes per chat
    #[serde(skip)]
    pending_replies: HashMap<ChatId, u32>,
    #[serde(skip)]
    effects: Vec<Effect>,
}

impl ChatStore {
    /// Seeds a store from generated data and selects the first chat.
    pub fn from_mock(data: MockData) -> Self {
        let mut store = Self::with_collections(data.users, data.chats, data.messages);
        if let Some(first) = store.chats.first().map(|chat| chat.id.clone()) {
            store.selected = Some(first.clone());
            store.mark_chat_as_read(&first).ok();
        }
        store
    }

    /// Builds a store without a selection. Every chat gets a (possibly
    /// empty) thread and threads without a chat are dropped.
    pub fn with_collections(
        users: Vec<User>,
        chats: Vec<Chat>,
        mut messages: HashMap<ChatId, Vec<Message>>,
    ) -> Self {
        for chat in &chats {
            messages.entry(chat.id.clone()).or_default();
        }
        messages.retain(|id, _| chats.iter().any(|chat| &chat.id == id));
        let ranks = chats
            .iter()
            .zip(0..)
            .map(|(chat, rank)| (chat.id.clone(), rank))
            .collect();

        let mut store = Self {
            users,
            chats,
            messages,
            ranks,
            ..Self::default()
        };
        store.resort();
        store
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, user_id: &UserId) -> Result<&User> {
        self.users
            .iter()
            .find(|user| &user.id == user_id)
            .ok_or_else(|| StoreError::UserNotFound(user_id.clone()))
    }

    /// All chats in display order, archived ones included.
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, chat_id: &ChatId) -> Result<&Chat> {
        self.chats
            .iter()
            .find(|chat| &chat.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.clone()))
    }

    pub fn messages(&self, chat_id: &ChatId) -> Result<&[Message]> {
        self.messages
            .get(chat_id)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.clone()))
    }

    pub fn message(&self, chat_id: &ChatId, message_id: &MessageId) -> Result<&Message> {
        self.messages(chat_id)?
            .iter()
            .find(|message| &message.id == message_id)
            .ok_or_else(|| StoreError::MessageNotFound {
                chat: chat_id.clone(),
                message: message_id.clone(),
            })
    }

    pub fn favorites(&self) -> &[Message] {
        &self.favorites
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn selected_chat_id(&self) -> Option<&ChatId> {
        self.selected.as_ref()
    }

    pub fn selected_chat(&self) -> Option<&Chat> {
        self.selected.as_ref().and_then(|id| self.chat(id).ok())
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut Panels {
        &mut self.panels
    }

    /// Drains the effects queued by transitions since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn is_selected(&self, chat_id: &ChatId) -> bool {
        self.selected.as_ref() == Some(chat_id)
    }

    fn chat_mut(&mut self, chat_id: &ChatId) -> Result<&mut Chat> {
        self.chats
            .iter_mut()
            .find(|chat| &chat.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.clone()))
    }

    fn thread_mut(&mut self, chat_id: &ChatId) -> Result<&mut Vec<Message>> {
        self.messages
            .get_mut(chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.clone()))
    }

    fn message_mut(&mut self, chat_id: &ChatId, message_id: &MessageId) -> Result<&mut Message> {
        self.thread_mut(chat_id)?
            .iter_mut()
            .find(|message| &message.id == message_id)
            .ok_or_else(|| StoreError::MessageNotFound {
                chat: chat_id.clone(),
                message: message_id.clone(),
            })
    }

    /// Pinned chats first, then by insertion rank.
    fn resort(&mut self) {
        let ranks = &self.ranks;
        self.chats
            .sort_by_key(|chat| (!chat.pinned, ranks.get(&chat.id).copied().unwrap_or_default()));
    }

    fn next_id(&mut self) -> String {
        self.ids.next(Utc::now())
    }
}
