//! Fixtures shared by the contract tests.

use chrono::{DateTime, Utc};
use mockchat_app::{AppConfig, AppState, ChatStore};
use mockchat_messaging::{ChatId, UserId};
use mockchat_mockdata::{generate, MockConfig, MockData};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed anchor so seeded datasets compare equal across runs.
pub fn anchor() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

pub fn mock_data(seed: u64) -> MockData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(&mut rng, &MockConfig::default(), anchor())
}

pub fn seeded_store(seed: u64) -> ChatStore {
    ChatStore::from_mock(mock_data(seed))
}

/// A store holding one direct chat per given user and no history.
pub fn empty_chats(users: &[&str]) -> ChatStore {
    let data = mock_data(1);
    let users: Vec<_> = data
        .users
        .into_iter()
        .filter(|user| users.contains(&user.id.as_str()))
        .collect();
    let chats = data
        .chats
        .into_iter()
        .filter(|chat| !chat.is_group && chat.peer.as_ref().is_some_and(|p| users.iter().any(|u| &u.id == p)))
        .map(|mut chat| {
            chat.pinned = false;
            chat.unread = 0;
            chat
        })
        .collect();
    ChatStore::with_collections(users, chats, HashMap::new())
}

pub fn state_with(store: ChatStore, seed: u64) -> Arc<AppState> {
    let config = AppConfig {
        session_id: format!("contracts-{seed}"),
        seed: Some(seed),
        ..AppConfig::default()
    };
    AppState::with_store(config, store)
}

pub fn chat(id: &str) -> ChatId {
    ChatId::new(id)
}

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}
