pub mod config;
pub mod responder;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use responder::{PeerResponder, ResponderConfig};
pub use state::AppState;
pub use store::{ChatStore, Effect, NewChat, Panel, StoreError};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
