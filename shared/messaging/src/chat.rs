//! Chat threads and the users that take part in them.

use serde::{Deserialize, Serialize};

use crate::{ChatId, Message, UserId, NOW_LABEL};

/// Avatar given to newly created group chats.
pub const GROUP_AVATAR: &str =
    "https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=100&h=100&fit=crop";

/// Default name of a user-created group.
pub const NEW_GROUP_NAME: &str = "New group";

/// Preview of a freshly created group.
pub const GROUP_CREATED_PREVIEW: &str = "Group created";

/// A person the local user can chat with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Avatar image URL
    pub avatar: String,
    /// Free-text presence status
    pub status: String,
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A conversation thread with denormalized preview metadata for list display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub name: String,
    pub avatar: String,

    /// Preview text of the latest activity
    pub last_message: String,

    /// Display string, not an instant
    pub timestamp: String,

    pub unread: u32,
    pub online: bool,
    pub is_group: bool,

    /// Member user ids; only set for groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<UserId>,

    /// Counterparty of a direct chat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<UserId>,

    /// Transient: the simulated peer is composing a reply
    #[serde(skip_deserializing)]
    pub typing: bool,

    pub pinned: bool,
    pub muted: bool,
    pub archived: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Per-chat background override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Chat {
    /// A one-to-one chat mirroring `user`'s name, avatar and presence.
    pub fn direct(id: ChatId, user: &User) -> Self {
        Self {
            id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            last_message: String::new(),
            timestamp: String::new(),
            unread: 0,
            online: user.online,
            is_group: false,
            members: Vec::new(),
            peer: Some(user.id.clone()),
            typing: false,
            pinned: false,
            muted: false,
            archived: false,
            folder: None,
            background: None,
        }
    }

    /// A group chat with the default name and avatar.
    pub fn group(id: ChatId, members: Vec<UserId>) -> Self {
        Self {
            id,
            name: NEW_GROUP_NAME.to_string(),
            avatar: GROUP_AVATAR.to_string(),
            last_message: GROUP_CREATED_PREVIEW.to_string(),
            timestamp: NOW_LABEL.to_string(),
            unread: 0,
            online: false,
            is_group: true,
            members,
            peer: None,
            typing: false,
            pinned: false,
            muted: false,
            archived: false,
            folder: None,
            background: None,
        }
    }

    /// Refreshes the list preview after `message` was appended.
    pub fn touch(&mut self, message: &Message) {
        self.last_message = message.preview();
        self.timestamp = NOW_LABEL.to_string();
    }

    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Stable pinned-first ordering. Relative order among equals is preserved.
pub fn sort_pinned_first(chats: &mut [Chat]) {
    chats.sort_by_key(|chat| !chat.pinned);
}
