//! Simulated peer: after a local send in a direct chat, the "other side"
//! types for a random delay and then answers with a canned response.
//!
//! Each chat gets a child of the session's root cancellation token, so a
//! pending reply is dropped when either its chat or the whole session goes
//! away.

use mockchat_messaging::ChatId;
use mockchat_mockdata::pools::PEER_RESPONSES;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Bounds of the random typing delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(2000),
            max_delay: Duration::from_millis(4000),
        }
    }
}

/// A reply drawn from the random source, waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReply {
    pub delay: Duration,
    pub text: &'static str,
}

#[derive(Debug)]
pub struct PeerResponder {
    config: ResponderConfig,
    rng: Mutex<ChaCha8Rng>,
    root: CancellationToken,
    chats: Mutex<HashMap<ChatId, CancellationToken>>,
}

impl PeerResponder {
    /// A `seed` makes delays and reply texts reproducible.
    pub fn new(config: ResponderConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
            root: CancellationToken::new(),
            chats: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    /// Draws a delay uniformly from the configured bounds and a response
    /// uniformly from the pool.
    pub fn plan_reply(&self) -> PlannedReply {
        let min = self.config.min_delay.as_millis() as u64;
        let max = (self.config.max_delay.as_millis() as u64).max(min);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let delay = Duration::from_millis(rng.gen_range(min..=max));
        let text = PEER_RESPONSES[rng.gen_range(0..PEER_RESPONSES.len())];
        PlannedReply { delay, text }
    }

    /// Token guarding pending replies for `chat_id`.
    pub fn token_for(&self, chat_id: &ChatId) -> CancellationToken {
        let mut chats = self.chats.lock().unwrap_or_else(PoisonError::into_inner);
        chats
            .entry(chat_id.clone())
            .or_insert_with(|| self.root.child_token())
            .clone()
    }

    /// Drops every pending reply for `chat_id`.
    pub fn cancel_chat(&self, chat_id: &ChatId) {
        let removed = self
            .chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(chat_id);
        if let Some(token) = removed {
            token.cancel();
            debug!(chat = %chat_id, "cancelled pending peer replies");
        }
    }

    /// Drops every pending reply in the session.
    pub fn shutdown(&self) {
        self.root.cancel();
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of chats holding a live reply token.
    pub fn tracked_chats(&self) -> usize {
        self.chats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}

impl Drop for PeerResponder {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
