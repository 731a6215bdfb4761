//! Message-level transitions: send, edit, delete, react, forward, favorites,
//! read state and the simulated peer's side of a conversation.

use chrono::Utc;
use mockchat_messaging::{
    AttachmentKind, ChatId, Message, MessageId, OutgoingMessage, ReactionChange, UserId,
    LOCAL_USER_ID, LOCAL_USER_NAME,
};
use tracing::debug;

use super::{ChatStore, Effect, Result};

impl ChatStore {
    /// Appends a message from the local user and refreshes the chat preview.
    ///
    /// Direct chats queue an [`Effect::PeerReply`]; the owning
    /// [`crate::AppState`] turns it into a scheduled reply.
    pub fn send_message(&mut self, chat_id: &ChatId, draft: OutgoingMessage) -> Result<Message> {
        self.chat(chat_id)?;
        draft.validate()?;
        if let Some(reply_to) = &draft.reply_to {
            self.message(chat_id, reply_to)?;
        }

        let message = Message::outgoing(MessageId::new(self.next_id()), draft, Utc::now());
        self.thread_mut(chat_id)?.push(message.clone());
        let chat = self.chat_mut(chat_id)?;
        chat.touch(&message);
        if !chat.is_group {
            self.effects.push(Effect::PeerReply(chat_id.clone()));
        }

        debug!(chat = %chat_id, message = %message.id, "sent message");
        Ok(message)
    }

    pub fn edit_message(
        &mut self,
        chat_id: &ChatId,
        message_id: &MessageId,
        text: impl Into<String>,
    ) -> Result<()> {
        self.message_mut(chat_id, message_id)?.edit(text)?;
        debug!(chat = %chat_id, message = %message_id, "edited message");
        Ok(())
    }

    /// Soft-deletes a message in place. Deleting twice is a no-op.
    pub fn delete_message(&mut self, chat_id: &ChatId, message_id: &MessageId) -> Result<()> {
        if self.message_mut(chat_id, message_id)?.soft_delete() {
            debug!(chat = %chat_id, message = %message_id, "deleted message");
        }
        Ok(())
    }

    /// Toggles the local user's reaction.
    pub fn react(
        &mut self,
        chat_id: &ChatId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<ReactionChange> {
        self.react_as(chat_id, message_id, emoji, &UserId::new(LOCAL_USER_ID))
    }

    /// Toggles `user_id`'s reaction: a new emoji replaces theirs, the same
    /// emoji removes it.
    pub fn react_as(
        &mut self,
        chat_id: &ChatId,
        message_id: &MessageId,
        emoji: &str,
        user_id: &UserId,
    ) -> Result<ReactionChange> {
        let user_name = if user_id.as_str() == LOCAL_USER_ID {
            LOCAL_USER_NAME.to_string()
        } else {
            self.user(user_id)?.name.clone()
        };
        let change = self
            .message_mut(chat_id, message_id)?
            .toggle_reaction(emoji, user_id, &user_name)?;
        debug!(chat = %chat_id, message = %message_id, user = %user_id, ?change, "reaction");
        Ok(change)
    }

    /// Copies a message into another chat as a forwarded message from the local user.
    pub fn forward_message(
        &mut self,
        from: &ChatId,
        message_id: &MessageId,
        to: &ChatId,
    ) -> Result<Message> {
        self.chat(to)?;
        let id = MessageId::new(self.next_id());
        let copy = self.message(from, message_id)?.forwarded_copy(id, Utc::now())?;

        self.thread_mut(to)?.push(copy.clone());
        self.chat_mut(to)?.touch(&copy);

        debug!(from = %from, to = %to, message = %copy.id, "forwarded message");
        Ok(copy)
    }

    /// Appends a copy of the message to favorites. No dedup.
    pub fn add_to_favorites(&mut self, chat_id: &ChatId, message_id: &MessageId) -> Result<()> {
        let message = self.message(chat_id, message_id)?.clone();
        self.favorites.push(message);
        Ok(())
    }

    /// The message that `message_id` replies to, if any.
    pub fn replied_message(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
    ) -> Result<Option<&Message>> {
        let Some(target) = &self.message(chat_id, message_id)?.reply_to else {
            return Ok(None);
        };
        Ok(self
            .messages(chat_id)?
            .iter()
            .find(|message| &message.id == target))
    }

    /// Messages of a chat carrying a visible attachment of `kind`.
    pub fn attachments(&self, chat_id: &ChatId, kind: AttachmentKind) -> Result<Vec<&Message>> {
        Ok(self
            .messages(chat_id)?
            .iter()
            .filter(|message| {
                message
                    .visible_attachment()
                    .is_some_and(|file| file.kind == kind)
            })
            .collect())
    }

    pub fn mark_chat_as_read(&mut self, chat_id: &ChatId) -> Result<()> {
        self.chat_mut(chat_id)?.unread = 0;
        for message in self.thread_mut(chat_id)? {
            message.read = true;
        }
        Ok(())
    }

    /// Marks the chat's simulated peer as composing one more reply.
    pub fn begin_typing(&mut self, chat_id: &ChatId) -> Result<()> {
        self.chat_mut(chat_id)?.typing = true;
        *self.pending_replies.entry(chat_id.clone()).or_default() += 1;
        Ok(())
    }

    /// Drops every owed reply; no chat is left typing.
    pub fn stop_typing(&mut self) {
        self.pending_replies.clear();
        for chat in &mut self.chats {
            chat.typing = false;
        }
    }

    /// Appends the simulated peer's reply. The unread counter grows unless
    /// the chat is currently selected, in which case the reply is read at once.
    pub fn deliver_peer_reply(&mut self, chat_id: &ChatId, text: &str) -> Result<Message> {
        self.chat(chat_id)?;
        let selected = self.is_selected(chat_id);

        let mut message = Message::incoming(MessageId::new(self.next_id()), text, Utc::now());
        message.read = selected;
        self.thread_mut(chat_id)?.push(message.clone());

        let still_owed = match self.pending_replies.get_mut(chat_id) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            _ => {
                self.pending_replies.remove(chat_id);
                false
            }
        };

        let chat = self.chat_mut(chat_id)?;
        chat.typing = still_owed;
        chat.touch(&message);
        chat.unread = if selected { 0 } else { chat.unread.saturating_add(1) };

        debug!(chat = %chat_id, message = %message.id, unread = chat.unread, "peer replied");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::small_store;
    use super::*;
    use crate::store::StoreError;
    use mockchat_messaging::{Attachment, Sender, DELETED_PLACEHOLDER, NOW_LABEL};

    fn chat(id: &str) -> ChatId {
        ChatId::new(id)
    }

    #[test]
    fn send_appends_last_and_updates_preview() {
        let mut store = small_store();
        let before = store.messages(&chat("chat-0")).unwrap().len();

        let sent = store
            .send_message(&chat("chat-0"), OutgoingMessage::text("hi"))
            .unwrap();

        let thread = store.messages(&chat("chat-0")).unwrap();
        assert_eq!(thread.len(), before + 1);
        assert_eq!(thread.last().unwrap(), &sent);
        assert_eq!(sent.sender, Sender::Me);
        assert!(sent.read);

        let preview = store.chat(&chat("chat-0")).unwrap();
        assert_eq!(preview.last_message, "hi");
        assert_eq!(preview.timestamp, NOW_LABEL);
    }

    #[test]
    fn send_to_missing_chat_fails() {
        let mut store = small_store();
        let err = store
            .send_message(&chat("missing"), OutgoingMessage::text("hi"))
            .unwrap_err();
        assert_eq!(err, StoreError::ChatNotFound(chat("missing")));
    }

    #[test]
    fn send_rejects_empty_and_dangling_reply() {
        let mut store = small_store();
        assert!(matches!(
            store.send_message(&chat("chat-0"), OutgoingMessage::text("")),
            Err(StoreError::InvalidOperation(_))
        ));
        let dangling = OutgoingMessage::text("re").with_reply_to(MessageId::new("nope"));
        assert!(store
            .send_message(&chat("chat-0"), dangling)
            .unwrap_err()
            .is_not_found());
        assert_eq!(store.messages(&chat("chat-0")).unwrap().len(), 2);
    }

    #[test]
    fn attachment_only_message_previews_file_name() {
        let mut store = small_store();
        let draft = OutgoingMessage::default().with_attachment(Attachment::new(
            "blob:1",
            "notes.txt",
            AttachmentKind::File,
        ));
        store.send_message(&chat("chat-1"), draft).unwrap();
        assert_eq!(store.chat(&chat("chat-1")).unwrap().last_message, "notes.txt");
        assert_eq!(
            store.attachments(&chat("chat-1"), AttachmentKind::File).unwrap().len(),
            1
        );
        assert!(store
            .attachments(&chat("chat-1"), AttachmentKind::Image)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn edit_marks_edited_and_keeps_reactions() {
        let mut store = small_store();
        let id = MessageId::new("m1");
        store.react(&chat("chat-0"), &id, "🔥").unwrap();
        store.edit_message(&chat("chat-0"), &id, "hello there").unwrap();

        let message = store.message(&chat("chat-0"), &id).unwrap();
        assert_eq!(message.text, "hello there");
        assert!(message.edited);
        assert_eq!(message.reactions.len(), 1);
    }

    #[test]
    fn delete_keeps_position_and_blocks_edit() {
        let mut store = small_store();
        let id = MessageId::new("m1");
        store.delete_message(&chat("chat-0"), &id).unwrap();

        let thread = store.messages(&chat("chat-0")).unwrap();
        assert_eq!(thread[0].id, id);
        assert!(thread[0].deleted);
        assert_eq!(thread[0].text, DELETED_PLACEHOLDER);

        assert!(matches!(
            store.edit_message(&chat("chat-0"), &id, "back"),
            Err(StoreError::InvalidOperation(_))
        ));
        assert!(store.delete_message(&chat("chat-0"), &id).is_ok());
    }

    #[test]
    fn replies_to_deleted_messages_stay_resolvable() {
        let mut store = small_store();
        let original = MessageId::new("m2");
        let reply = store
            .send_message(
                &chat("chat-0"),
                OutgoingMessage::text("fine").with_reply_to(original.clone()),
            )
            .unwrap();
        store.delete_message(&chat("chat-0"), &original).unwrap();

        let target = store
            .replied_message(&chat("chat-0"), &reply.id)
            .unwrap()
            .unwrap();
        assert_eq!(target.id, original);
        assert_eq!(target.text, DELETED_PLACEHOLDER);
    }

    #[test]
    fn react_twice_with_same_emoji_clears() {
        let mut store = small_store();
        let id = MessageId::new("m1");
        assert_eq!(store.react(&chat("chat-0"), &id, "👍").unwrap(), ReactionChange::Added);
        assert_eq!(store.react(&chat("chat-0"), &id, "👍").unwrap(), ReactionChange::Removed);
        assert!(store.message(&chat("chat-0"), &id).unwrap().reactions.is_empty());
    }

    #[test]
    fn react_with_second_emoji_replaces() {
        let mut store = small_store();
        let id = MessageId::new("m1");
        store.react(&chat("chat-0"), &id, "👍").unwrap();
        store.react(&chat("chat-0"), &id, "😂").unwrap();
        let reactions = &store.message(&chat("chat-0"), &id).unwrap().reactions;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].emoji, "😂");
        assert_eq!(reactions[0].user_name, LOCAL_USER_NAME);
    }

    #[test]
    fn react_as_known_user_uses_their_name() {
        let mut store = small_store();
        let id = MessageId::new("g1");
        store
            .react_as(&chat("group-0"), &id, "🎉", &UserId::new("user-0"))
            .unwrap();
        let reaction = &store.message(&chat("group-0"), &id).unwrap().reactions[0];
        assert_eq!(reaction.user_name, "Anna Petrova");
        assert!(store
            .react_as(&chat("group-0"), &id, "🎉", &UserId::new("ghost"))
            .is_err());
    }

    #[test]
    fn forward_copies_into_target_chat() {
        let mut store = small_store();
        let copy = store
            .forward_message(&chat("chat-0"), &MessageId::new("m1"), &chat("chat-1"))
            .unwrap();
        assert!(copy.forwarded);
        assert_eq!(copy.text, "hello");
        assert_eq!(copy.sender, Sender::Me);
        assert_ne!(copy.id, MessageId::new("m1"));
        assert_eq!(store.messages(&chat("chat-1")).unwrap(), &[copy]);
        assert_eq!(store.chat(&chat("chat-1")).unwrap().last_message, "hello");

        store.delete_message(&chat("chat-0"), &MessageId::new("m1")).unwrap();
        assert!(store
            .forward_message(&chat("chat-0"), &MessageId::new("m1"), &chat("chat-1"))
            .is_err());
    }

    #[test]
    fn favorites_append_copies_without_dedup() {
        let mut store = small_store();
        let id = MessageId::new("m1");
        store.add_to_favorites(&chat("chat-0"), &id).unwrap();
        store.add_to_favorites(&chat("chat-0"), &id).unwrap();
        assert_eq!(store.favorites().len(), 2);

        store.edit_message(&chat("chat-0"), &id, "changed").unwrap();
        assert_eq!(store.favorites()[0].text, "hello");
    }

    #[test]
    fn mark_as_read_clears_everything() {
        let mut store = small_store();
        store.mark_chat_as_read(&chat("chat-0")).unwrap();
        assert_eq!(store.chat(&chat("chat-0")).unwrap().unread, 0);
        assert!(store.messages(&chat("chat-0")).unwrap().iter().all(|m| m.read));
    }

    #[test]
    fn peer_reply_counts_unread_when_not_selected() {
        let mut store = small_store();
        store.begin_typing(&chat("chat-1")).unwrap();
        assert!(store.chat(&chat("chat-1")).unwrap().typing);

        let reply = store.deliver_peer_reply(&chat("chat-1"), "Agreed!").unwrap();
        assert_eq!(reply.sender, Sender::Other);
        assert!(!reply.read);

        let target = store.chat(&chat("chat-1")).unwrap();
        assert!(!target.typing);
        assert_eq!(target.unread, 1);
        assert_eq!(target.last_message, "Agreed!");
    }

    #[test]
    fn peer_reply_in_selected_chat_stays_read() {
        let mut store = small_store();
        store.select_chat(&chat("chat-1")).unwrap();
        let reply = store.deliver_peer_reply(&chat("chat-1"), "Agreed!").unwrap();
        assert!(reply.read);
        assert_eq!(store.chat(&chat("chat-1")).unwrap().unread, 0);
    }

    #[test]
    fn direct_send_queues_peer_reply_but_group_send_does_not() {
        let mut store = small_store();
        store
            .send_message(&chat("chat-0"), OutgoingMessage::text("hi"))
            .unwrap();
        store
            .send_message(&chat("group-0"), OutgoingMessage::text("hi all"))
            .unwrap();
        assert_eq!(store.take_effects(), vec![Effect::PeerReply(chat("chat-0"))]);
        assert!(store.take_effects().is_empty());
    }

    #[test]
    fn typing_lasts_until_every_owed_reply_lands() {
        let mut store = small_store();
        store.begin_typing(&chat("chat-1")).unwrap();
        store.begin_typing(&chat("chat-1")).unwrap();

        store.deliver_peer_reply(&chat("chat-1"), "first").unwrap();
        assert!(store.chat(&chat("chat-1")).unwrap().typing);

        store.deliver_peer_reply(&chat("chat-1"), "second").unwrap();
        assert!(!store.chat(&chat("chat-1")).unwrap().typing);
    }

    #[test]
    fn stop_typing_clears_every_chat() {
        let mut store = small_store();
        store.begin_typing(&chat("chat-0")).unwrap();
        store.begin_typing(&chat("chat-1")).unwrap();
        store.stop_typing();
        assert!(store.chats().iter().all(|c| !c.typing));

        store.begin_typing(&chat("chat-1")).unwrap();
        store.deliver_peer_reply(&chat("chat-1"), "late").unwrap();
        assert!(!store.chat(&chat("chat-1")).unwrap().typing);
    }
}
