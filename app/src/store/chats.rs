//! Chat-level transitions and chat list queries.

use mockchat_messaging::{Chat, ChatId, Theme, ThemePreset, User, UserId};
use tracing::{debug, info};

use super::{ChatStore, Effect, Panel, Result, StoreError};

/// Target of a "new chat" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewChat {
    /// One-to-one chat with an existing user. Duplicates are allowed.
    Direct(UserId),
    /// Group chat with the given members.
    Group(Vec<UserId>),
}

impl ChatStore {
    /// Makes `chat_id` the selected chat and marks it read.
    pub fn select_chat(&mut self, chat_id: &ChatId) -> Result<()> {
        self.chat(chat_id)?;
        self.selected = Some(chat_id.clone());
        self.mark_chat_as_read(chat_id)
    }

    /// Flips the pinned flag and re-sorts pinned-first. Returns the new value.
    ///
    /// Chats keep their insertion rank, so pinning and unpinning a chat
    /// puts it back where it was.
    pub fn toggle_pin(&mut self, chat_id: &ChatId) -> Result<bool> {
        let chat = self.chat_mut(chat_id)?;
        chat.pinned = !chat.pinned;
        let pinned = chat.pinned;
        self.resort();
        debug!(chat = %chat_id, pinned, "toggled pin");
        Ok(pinned)
    }

    pub fn toggle_mute(&mut self, chat_id: &ChatId) -> Result<bool> {
        let chat = self.chat_mut(chat_id)?;
        chat.muted = !chat.muted;
        debug!(chat = %chat_id, muted = chat.muted, "toggled mute");
        Ok(chat.muted)
    }

    pub fn toggle_archive(&mut self, chat_id: &ChatId) -> Result<bool> {
        let chat = self.chat_mut(chat_id)?;
        chat.archived = !chat.archived;
        debug!(chat = %chat_id, archived = chat.archived, "toggled archive");
        Ok(chat.archived)
    }

    /// Unarchives a chat and opens it.
    pub fn open_archived(&mut self, chat_id: &ChatId) -> Result<()> {
        self.chat_mut(chat_id)?.archived = false;
        self.panels.close(Panel::Archived);
        self.select_chat(chat_id)
    }

    /// Removes a chat together with its thread. If it was selected, the
    /// first remaining chat (if any) becomes selected. Queues an
    /// [`Effect::CancelReplies`] for replies still owed to it.
    pub fn delete_chat(&mut self, chat_id: &ChatId) -> Result<Chat> {
        let pos = self
            .chats
            .iter()
            .position(|chat| &chat.id == chat_id)
            .ok_or_else(|| StoreError::ChatNotFound(chat_id.clone()))?;
        let chat = self.chats.remove(pos);
        self.messages.remove(chat_id);
        self.ranks.remove(chat_id);
        self.pending_replies.remove(chat_id);
        self.effects.push(Effect::CancelReplies(chat_id.clone()));

        if self.is_selected(chat_id) {
            self.selected = None;
            if let Some(next) = self.chats.first().map(|chat| chat.id.clone()) {
                self.select_chat(&next)?;
            }
        }

        info!(chat = %chat_id, selected = ?self.selected, "deleted chat");
        Ok(chat)
    }

    /// Creates a chat with an empty thread and selects it.
    pub fn create_chat(&mut self, target: NewChat) -> Result<ChatId> {
        let id = ChatId::new(self.next_id());
        let chat = match target {
            NewChat::Direct(user_id) => Chat::direct(id.clone(), self.user(&user_id)?),
            NewChat::Group(members) => {
                if members.is_empty() {
                    return Err(StoreError::InvalidOperation(
                        "group chat needs at least one member".to_string(),
                    ));
                }
                for member in &members {
                    self.user(member)?;
                }
                Chat::group(id.clone(), members)
            }
        };

        // Newest chats rank ahead of everything inserted before them.
        let rank = self.ranks.values().min().map_or(0, |min| min - 1);
        info!(chat = %id, name = %chat.name, group = chat.is_group, "created chat");
        self.ranks.insert(id.clone(), rank);
        self.chats.push(chat);
        self.messages.insert(id.clone(), Vec::new());
        self.resort();
        self.panels.close(Panel::NewChat);
        self.select_chat(&id)?;
        Ok(id)
    }

    pub fn set_chat_folder(&mut self, chat_id: &ChatId, folder: Option<String>) -> Result<()> {
        self.chat_mut(chat_id)?.folder = folder;
        Ok(())
    }

    pub fn set_chat_background(
        &mut self,
        chat_id: &ChatId,
        background: Option<String>,
    ) -> Result<()> {
        self.chat_mut(chat_id)?.background = background;
        Ok(())
    }

    /// Non-archived chats whose name contains `query`, case-insensitively.
    pub fn visible_chats(&self, query: &str) -> Vec<&Chat> {
        self.chats
            .iter()
            .filter(|chat| !chat.archived && chat.matches_query(query))
            .collect()
    }

    pub fn archived_chats(&self) -> Vec<&Chat> {
        self.chats.iter().filter(|chat| chat.archived).collect()
    }

    pub fn archived_count(&self) -> usize {
        self.chats.iter().filter(|chat| chat.archived).count()
    }

    /// Counterparty of a direct chat; `None` for groups.
    pub fn chat_peer(&self, chat_id: &ChatId) -> Result<Option<&User>> {
        match &self.chat(chat_id)?.peer {
            Some(user_id) => Ok(Some(self.user(user_id)?)),
            None => Ok(None),
        }
    }

    pub fn online_users(&self) -> Vec<&User> {
        self.users.iter().filter(|user| user.online).collect()
    }

    /// Replaces the theme wholesale.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        let preset: ThemePreset = name.parse()?;
        self.theme = preset.theme();
        debug!(preset = preset.name(), "applied theme preset");
        Ok(())
    }
}
