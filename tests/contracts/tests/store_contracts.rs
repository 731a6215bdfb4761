use mockchat_app::{NewChat, StoreError};
use mockchat_contracts::{chat, empty_chats, mock_data, seeded_store, state_with, user};
use mockchat_messaging::{Attachment, AttachmentKind, OutgoingMessage, Sender, DELETED_PLACEHOLDER};
use std::time::Duration;

#[test]
fn every_chat_has_exactly_one_thread() {
    let mut store = seeded_store(3);
    store.create_chat(NewChat::Direct(user("user-4"))).unwrap();
    store
        .create_chat(NewChat::Group(vec![user("user-1"), user("user-2")]))
        .unwrap();
    let victim = store.chats()[7].id.clone();
    store.delete_chat(&victim).unwrap();

    for c in store.chats() {
        assert!(store.messages(&c.id).is_ok(), "no thread for {}", c.id);
    }
    assert!(store.messages(&victim).is_err());
}

#[test]
fn send_appends_exactly_one_message_to_every_chat() {
    let mut store = seeded_store(5);
    let ids: Vec<_> = store.chats().iter().map(|c| c.id.clone()).collect();
    for id in ids {
        let before = store.messages(&id).unwrap().len();
        let sent = store
            .send_message(&id, OutgoingMessage::text("ping"))
            .unwrap();
        let thread = store.messages(&id).unwrap();
        assert_eq!(thread.len(), before + 1);
        assert_eq!(thread.last().unwrap().id, sent.id);
    }
}

#[test]
fn delete_message_changes_only_text_and_flag() {
    let mut store = seeded_store(8);
    let chat_id = store.chats()[0].id.clone();
    let draft = OutgoingMessage::text("with file")
        .with_attachment(Attachment::new("blob:x", "x.png", AttachmentKind::Image));
    let sent = store.send_message(&chat_id, draft).unwrap();
    store.react(&chat_id, &sent.id, "👍").unwrap();
    let position = store.messages(&chat_id).unwrap().len() - 1;

    store.delete_message(&chat_id, &sent.id).unwrap();

    let thread = store.messages(&chat_id).unwrap();
    let deleted = &thread[position];
    assert_eq!(deleted.id, sent.id);
    assert_eq!(deleted.timestamp, sent.timestamp);
    assert!(deleted.deleted);
    assert_eq!(deleted.text, DELETED_PLACEHOLDER);
    assert!(deleted.visible_reactions().is_empty());
    assert!(deleted.visible_attachment().is_none());
    assert!(store
        .attachments(&chat_id, AttachmentKind::Image)
        .unwrap()
        .iter()
        .all(|m| m.id != sent.id));
}

#[test]
fn reacting_twice_toggles_and_different_emoji_replaces() {
    let mut store = seeded_store(9);
    let chat_id = store.chats()[0].id.clone();
    let message_id = store.messages(&chat_id).unwrap()[0].id.clone();

    store.react(&chat_id, &message_id, "🔥").unwrap();
    store.react(&chat_id, &message_id, "🔥").unwrap();
    let mine = |store: &mockchat_app::ChatStore| {
        store
            .message(&chat_id, &message_id)
            .unwrap()
            .reactions
            .iter()
            .filter(|r| r.user_id.as_str() == "me")
            .map(|r| r.emoji.clone())
            .collect::<Vec<_>>()
    };
    assert!(mine(&store).is_empty());

    store.react(&chat_id, &message_id, "🔥").unwrap();
    store.react(&chat_id, &message_id, "🎉").unwrap();
    assert_eq!(mine(&store), vec!["🎉".to_string()]);
}

#[test]
fn pinning_keeps_pinned_first_and_double_toggle_is_identity() {
    let mut store = seeded_store(13);
    let original: Vec<_> = store.chats().iter().map(|c| c.id.clone()).collect();

    for id in original.iter().step_by(7) {
        store.toggle_pin(id).unwrap();
        let first_unpinned = store
            .chats()
            .iter()
            .position(|c| !c.pinned)
            .unwrap_or(store.chats().len());
        assert!(store.chats()[first_unpinned..].iter().all(|c| !c.pinned));

        store.toggle_pin(id).unwrap();
        let order: Vec<_> = store.chats().iter().map(|c| c.id.clone()).collect();
        assert_eq!(order, original);
    }
}

#[test]
fn mark_as_read_always_clears() {
    let mut store = seeded_store(21);
    let ids: Vec<_> = store.chats().iter().map(|c| c.id.clone()).collect();
    for id in &ids {
        store.mark_chat_as_read(id).unwrap();
        assert_eq!(store.chat(id).unwrap().unread, 0);
        assert!(store.messages(id).unwrap().iter().all(|m| m.read));
    }
}

#[test]
fn create_direct_chat_scenario() {
    let data = mock_data(2);
    let target = data.users[3].clone();
    let mut store = mockchat_app::ChatStore::from_mock(data);

    let id = store.create_chat(NewChat::Direct(target.id.clone())).unwrap();

    let created = store.chat(&id).unwrap();
    assert_eq!(created.name, target.name);
    assert_eq!(created.avatar, target.avatar);
    assert!(store.messages(&id).unwrap().is_empty());
    assert_eq!(store.selected_chat_id(), Some(&id));
}

#[test]
fn delete_selected_chat_scenario() {
    let mut store = empty_chats(&["user-0", "user-1"]);
    store.select_chat(&chat("chat-0")).unwrap();

    store.delete_chat(&chat("chat-0")).unwrap();

    assert_eq!(store.selected_chat_id(), Some(&chat("chat-1")));
    assert!(store.chats().iter().all(|c| c.id != chat("chat-0")));
    assert_eq!(
        store.messages(&chat("chat-0")),
        Err(StoreError::ChatNotFound(chat("chat-0")))
    );
}

#[test]
fn missing_references_are_reported() {
    let mut store = seeded_store(4);
    let ghost = chat("ghost");
    assert!(store
        .send_message(&ghost, OutgoingMessage::text("x"))
        .unwrap_err()
        .is_not_found());
    assert!(store.toggle_mute(&ghost).unwrap_err().is_not_found());
    assert!(store.delete_chat(&ghost).unwrap_err().is_not_found());
    assert_eq!(
        store.create_chat(NewChat::Direct(user("user-999"))),
        Err(StoreError::UserNotFound(user("user-999")))
    );
}

#[tokio::test(start_paused = true)]
async fn send_then_simulated_reply_scenario() {
    let state = state_with(empty_chats(&["user-0"]), 11);
    let c = chat("chat-0");

    state
        .send_message(&c, OutgoingMessage::text("hi"))
        .await
        .unwrap();
    {
        let store = state.read().await;
        let thread = store.messages(&c).unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].text, "hi");
        assert_eq!(thread[0].sender, Sender::Me);
        assert!(thread[0].read);
    }

    tokio::time::sleep(Duration::from_secs(5)).await;

    let store = state.read().await;
    let thread = store.messages(&c).unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[1].sender, Sender::Other);
    // chat-0 is not selected in this store, so the reply is unread.
    assert_eq!(store.chat(&c).unwrap().unread, 1);
}

#[tokio::test(start_paused = true)]
async fn replies_keep_issue_order() {
    let state = state_with(empty_chats(&["user-0"]), 12);
    let c = chat("chat-0");

    state.send_message(&c, OutgoingMessage::text("one")).await.unwrap();
    state.send_message(&c, OutgoingMessage::text("two")).await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let store = state.read().await;
    let thread = store.messages(&c).unwrap();
    assert_eq!(thread.len(), 4);
    assert_eq!(thread[0].text, "one");
    assert_eq!(thread[1].text, "two");
    assert!(thread[2..].iter().all(|m| m.sender == Sender::Other));
    let ids: Vec<i64> = thread
        .iter()
        .map(|m| m.id.as_str().parse().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn same_seed_same_dataset() {
    let a = mock_data(42);
    let b = mock_data(42);
    assert_eq!(a.users, b.users);
    assert_eq!(a.chats, b.chats);
    for chat in &a.chats {
        assert_eq!(a.messages[&chat.id], b.messages[&chat.id]);
    }
}
