use anyhow::Context;
use mockchat_app::{init_tracing, AppConfig, AppState};
use mockchat_messaging::OutgoingMessage;
use serde_json::json;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let wait = config.responder.max_delay + Duration::from_millis(100);
    let state = AppState::new(config);
    info!(session = %state.session_id(), "starting MockChat demo session");

    let chat_id = state
        .read()
        .await
        .chats()
        .iter()
        .find(|chat| !chat.is_group)
        .map(|chat| chat.id.clone())
        .context("seeded data has no direct chat")?;

    state.update(|store| store.select_chat(&chat_id)).await?;
    let sent = state
        .send_message(&chat_id, OutgoingMessage::text("Hi! Are you free tonight?"))
        .await?;

    tokio::time::sleep(wait).await;

    state
        .update(|store| store.react(&chat_id, &sent.id, "👍"))
        .await?;
    let pinned = state.update(|store| store.toggle_pin(&chat_id)).await?;

    let summary = {
        let store = state.read().await;
        let chat = store.chat(&chat_id)?;
        json!({
            "session": state.session_id(),
            "chats": store.chats().len(),
            "archived": store.archived_count(),
            "onlineUsers": store.online_users().len(),
            "selected": store.selected_chat_id(),
            "chat": chat,
            "pinned": pinned,
            "thread": store.messages(&chat_id)?,
        })
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    state.shutdown().await;
    Ok(())
}
