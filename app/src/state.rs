//! Shared session state.
//!
//! `AppState` is the single owner of the chat store. Every mutation goes
//! through one `RwLock`, which also serializes the simulated peer's delayed
//! replies with user-initiated transitions.

use mockchat_messaging::{Chat, ChatId, Message, OutgoingMessage};
use mockchat_mockdata::generate_seeded;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::responder::{PeerResponder, PlannedReply};
use crate::store::{ChatStore, Effect, Result};

#[derive(Debug)]
pub struct AppState {
    config: AppConfig,
    store: Arc<RwLock<ChatStore>>,
    responder: PeerResponder,
}

impl AppState {
    /// Seeds a fresh store with mock data according to `config`.
    pub fn new(config: AppConfig) -> Arc<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let store = ChatStore::from_mock(generate_seeded(seed, &config.mock));
        info!(
            session = %config.session_id,
            seed,
            chats = store.chats().len(),
            users = store.users().len(),
            "seeded chat session"
        );
        Self::with_store(config, store)
    }

    /// Wraps an existing store.
    pub fn with_store(config: AppConfig, store: ChatStore) -> Arc<Self> {
        let responder = PeerResponder::new(config.responder.clone(), config.seed);
        Arc::new(Self {
            config,
            store: Arc::new(RwLock::new(store)),
            responder,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Read-only view of the whole store.
    pub async fn read(&self) -> RwLockReadGuard<'_, ChatStore> {
        self.store.read().await
    }

    /// Runs a transition under the write lock, then carries out whatever
    /// the transition queued for the peer responder.
    pub async fn update<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut ChatStore) -> T,
    {
        let mut store = self.store.write().await;
        let out = f(&mut store);
        self.apply_effects(&mut store);
        out
    }

    /// Sends a message; in a direct chat the simulated peer starts typing
    /// a reply.
    pub async fn send_message(&self, chat_id: &ChatId, draft: OutgoingMessage) -> Result<Message> {
        self.update(|store| store.send_message(chat_id, draft)).await
    }

    /// Deletes a chat and drops any reply still pending for it.
    pub async fn delete_chat(&self, chat_id: &ChatId) -> Result<Chat> {
        self.update(|store| store.delete_chat(chat_id)).await
    }

    /// Cancels every pending reply and leaves no chat typing. The store
    /// stays readable.
    pub async fn shutdown(&self) {
        let mut store = self.store.write().await;
        self.responder.shutdown();
        store.stop_typing();
        store.take_effects();
        info!(session = %self.config.session_id, "chat session shut down");
    }

    fn apply_effects(&self, store: &mut ChatStore) {
        for effect in store.take_effects() {
            match effect {
                Effect::PeerReply(chat_id) => {
                    if self.responder.is_shut_down() {
                        continue;
                    }
                    if let Err(err) = store.begin_typing(&chat_id) {
                        warn!(chat = %chat_id, %err, "peer cannot reply");
                        continue;
                    }
                    self.schedule_reply(chat_id, self.responder.plan_reply());
                }
                Effect::CancelReplies(chat_id) => self.responder.cancel_chat(&chat_id),
            }
        }
    }

    fn schedule_reply(&self, chat_id: ChatId, reply: PlannedReply) {
        let token = self.responder.token_for(&chat_id);
        let store = Arc::clone(&self.store);
        debug!(chat = %chat_id, delay_ms = reply.delay.as_millis() as u64, "peer typing");

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(chat = %chat_id, "peer reply cancelled");
                }
                _ = tokio::time::sleep(reply.delay) => {
                    let mut store = store.write().await;
                    // The chat may have been deleted while we waited for the lock.
                    if token.is_cancelled() {
                        debug!(chat = %chat_id, "peer reply cancelled");
                        return;
                    }
                    if let Err(err) = store.deliver_peer_reply(&chat_id, reply.text) {
                        warn!(chat = %chat_id, %err, "dropping peer reply");
                    }
                }
            }
        });
    }
}
