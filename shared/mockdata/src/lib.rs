//! Mock data generator.
//!
//! Synthesizes a self-consistent initial dataset (users, one direct chat per
//! user, a handful of group chats and a message history for each chat) from
//! fixed content pools. The shape is deterministic; the content comes from an
//! injected random source so tests can seed it.

pub mod pools;

use chrono::{DateTime, Duration, Utc};
use mockchat_messaging::chat::{sort_pinned_first, GROUP_AVATAR};
use mockchat_messaging::{Chat, ChatId, Message, MessageId, Sender, User, UserId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use pools::{AVATARS, DIRECT_MESSAGES, FIRST_NAMES, GROUP_NAMES, LAST_NAMES, PREVIEWS, STATUSES};

/// Size of the generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    pub users: usize,
    pub groups: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            users: 50,
            groups: 5,
        }
    }
}

/// Initial snapshot handed to the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MockData {
    pub users: Vec<User>,
    /// Pinned chats first, otherwise in generation order
    pub chats: Vec<Chat>,
    /// One entry per chat id
    pub messages: HashMap<ChatId, Vec<Message>>,
}

/// Generates a dataset from a seeded ChaCha stream, anchored at the current time.
pub fn generate_seeded(seed: u64, config: &MockConfig) -> MockData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(&mut rng, config, Utc::now())
}

/// Generates a dataset whose message histories end just before `now`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &MockConfig, now: DateTime<Utc>) -> MockData {
    let mut data = MockData::default();

    for i in 0..config.users {
        let user = User {
            id: UserId::new(format!("user-{i}")),
            name: format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES)),
            avatar: AVATARS[i % AVATARS.len()].to_string(),
            status: pick(rng, &STATUSES).to_string(),
            online: rng.gen_bool(0.4),
            bio: None,
            phone: None,
        };

        let mut chat = Chat::direct(ChatId::new(format!("chat-{i}")), &user);
        chat.last_message = pick(rng, &PREVIEWS).to_string();
        chat.timestamp = relative_label(rng.gen::<f64>() * 72.0);
        chat.unread = if rng.gen_bool(0.3) { rng.gen_range(1..=5) } else { 0 };
        chat.pinned = rng.gen_bool(0.1);

        let count = rng.gen_range(3..=15);
        let history = history(rng, count, 0.5, now, |j| format!("msg-{i}-{j}"), &DIRECT_MESSAGES);

        data.messages.insert(chat.id.clone(), history);
        data.chats.push(chat);
        data.users.push(user);
    }

    for i in 0..config.groups {
        let member_count = rng.gen_range(3..=8).min(config.users);
        let members = (0..member_count)
            .map(|idx| UserId::new(format!("user-{idx}")))
            .collect();

        let mut chat = Chat::group(ChatId::new(format!("group-{i}")), members);
        chat.name = GROUP_NAMES[i % GROUP_NAMES.len()].to_string();
        chat.avatar = GROUP_AVATAR.to_string();
        chat.last_message = pick(rng, &PREVIEWS).to_string();
        chat.timestamp = relative_label(rng.gen::<f64>() * 72.0);
        chat.unread = rng.gen_range(0..=10);

        let count = rng.gen_range(5..=20);
        let history = history(rng, count, 0.3, now, |j| format!("group-msg-{i}-{j}"), &PREVIEWS);

        data.messages.insert(chat.id.clone(), history);
        data.chats.push(chat);
    }

    sort_pinned_first(&mut data.chats);

    debug!(
        users = data.users.len(),
        chats = data.chats.len(),
        pinned = data.chats.iter().filter(|c| c.pinned).count(),
        "generated mock data"
    );
    data
}

/// `count` read messages one hour apart, the last one an hour before `now`.
fn history<R, F>(
    rng: &mut R,
    count: usize,
    mine_probability: f64,
    now: DateTime<Utc>,
    id: F,
    texts: &[&str],
) -> Vec<Message>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> String,
{
    (0..count)
        .map(|j| {
            let sender = if rng.gen_bool(mine_probability) {
                Sender::Me
            } else {
                Sender::Other
            };
            let hours_ago = (count - j) as i64;
            let mut message = Message::incoming(
                MessageId::new(id(j)),
                pick(rng, texts),
                now - Duration::hours(hours_ago),
            );
            message.sender = sender;
            message.read = true;
            message
        })
        .collect()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Chat list label for activity `hours` ago.
pub fn relative_label(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} min", (hours * 60.0).floor() as u32)
    } else if hours < 24.0 {
        format!("{} h", hours.floor() as u32)
    } else {
        match (hours / 24.0).floor() as u32 {
            1 => "Yesterday".to_string(),
            days => format!("{days} d"),
        }
    }
}
