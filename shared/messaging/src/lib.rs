//! Chat and message models shared across MockChat crates.

pub mod chat;
pub mod theme;

pub use chat::{Chat, User};
pub use theme::{Theme, ThemePreset};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown in place of a deleted message.
pub const DELETED_PLACEHOLDER: &str = "Message deleted";

/// Chat preview used when a message carries only an unnamed attachment.
pub const ATTACHMENT_PREVIEW: &str = "File";

/// Display timestamp for chats touched by the current session.
pub const NOW_LABEL: &str = "Now";

/// Identity of the local user in reactions.
pub const LOCAL_USER_ID: &str = "me";
pub const LOCAL_USER_NAME: &str = "You";

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ChatId, "Unique identifier of a chat thread.");
define_id!(MessageId, "Unique identifier of a message within the store.");
define_id!(UserId, "Unique identifier of a user.");

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local user.
    Me,
    /// The counterparty (or any group member).
    Other,
}

/// Kind of file carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub name: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    pub fn new(url: impl Into<String>, name: impl Into<String>, kind: AttachmentKind) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            kind,
        }
    }
}

/// A per-user emoji annotation. At most one per user per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub emoji: String,
    pub user_id: UserId,
    pub user_name: String,
}

/// What a reaction toggle did to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Added,
    Replaced,
    Removed,
}

/// Content the local user composes before it becomes a [`Message`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub reply_to: Option<MessageId>,
    pub attachment: Option<Attachment>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Rejects drafts that carry neither text nor a file.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() && self.attachment.is_none() {
            return Err(ModelError::EmptyMessage);
        }
        Ok(())
    }
}

/// A single timestamped item in a chat's history.
///
/// Deletion is a soft delete: the record keeps its id, timestamp and
/// position, while its content is replaced by [`DELETED_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<MessageId>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub forwarded: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Message {
    /// Builds a message from the local user. Outgoing messages are born read.
    pub fn outgoing(id: MessageId, draft: OutgoingMessage, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: draft.text,
            sender: Sender::Me,
            timestamp,
            edited: false,
            reactions: Vec::new(),
            attachment: draft.attachment,
            reply_to: draft.reply_to,
            read: true,
            forwarded: false,
            deleted: false,
        }
    }

    /// Builds an unread message from the counterparty.
    pub fn incoming(id: MessageId, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Other,
            timestamp,
            edited: false,
            reactions: Vec::new(),
            attachment: None,
            reply_to: None,
            read: false,
            forwarded: false,
            deleted: false,
        }
    }

    /// Text for the chat list preview.
    pub fn preview(&self) -> String {
        preview_for(&self.text, self.attachment.as_ref())
    }

    pub fn edit(&mut self, text: impl Into<String>) -> Result<()> {
        if self.deleted {
            return Err(ModelError::Deleted(self.id.clone()));
        }
        self.text = text.into();
        self.edited = true;
        Ok(())
    }

    /// Soft-deletes the message. Returns `false` if it was already deleted.
    pub fn soft_delete(&mut self) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        self.text = DELETED_PLACEHOLDER.to_string();
        self.attachment = None;
        self.reactions.clear();
        true
    }

    /// Applies the toggle/replace rule for `user_id`'s reaction.
    pub fn toggle_reaction(
        &mut self,
        emoji: &str,
        user_id: &UserId,
        user_name: &str,
    ) -> Result<ReactionChange> {
        if self.deleted {
            return Err(ModelError::Deleted(self.id.clone()));
        }
        match self.reactions.iter().position(|r| &r.user_id == user_id) {
            Some(pos) if self.reactions[pos].emoji == emoji => {
                self.reactions.remove(pos);
                Ok(ReactionChange::Removed)
            }
            Some(pos) => {
                self.reactions[pos].emoji = emoji.to_string();
                Ok(ReactionChange::Replaced)
            }
            None => {
                self.reactions.push(Reaction {
                    emoji: emoji.to_string(),
                    user_id: user_id.clone(),
                    user_name: user_name.to_string(),
                });
                Ok(ReactionChange::Added)
            }
        }
    }

    /// Reactions as they should be rendered; empty for deleted messages.
    pub fn visible_reactions(&self) -> &[Reaction] {
        if self.deleted {
            &[]
        } else {
            &self.reactions
        }
    }

    /// Attachment as it should be rendered; `None` for deleted messages.
    pub fn visible_attachment(&self) -> Option<&Attachment> {
        if self.deleted {
            None
        } else {
            self.attachment.as_ref()
        }
    }

    /// Copy of this message as the local user forwards it elsewhere.
    pub fn forwarded_copy(&self, id: MessageId, timestamp: DateTime<Utc>) -> Result<Self> {
        if self.deleted {
            return Err(ModelError::Deleted(self.id.clone()));
        }
        let draft = OutgoingMessage {
            text: self.text.clone(),
            reply_to: None,
            attachment: self.attachment.clone(),
        };
        let mut copy = Self::outgoing(id, draft, timestamp);
        copy.forwarded = true;
        Ok(copy)
    }
}

fn preview_for(text: &str, attachment: Option<&Attachment>) -> String {
    if !text.is_empty() {
        return text.to_string();
    }
    match attachment {
        Some(file) if !file.name.is_empty() => file.name.clone(),
        _ => ATTACHMENT_PREVIEW.to_string(),
    }
}

/// Model-level validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("message has neither text nor attachment")]
    EmptyMessage,
    #[error("message {0} is deleted")]
    Deleted(MessageId),
    #[error("unknown theme preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
