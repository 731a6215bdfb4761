use anyhow::{bail, Context};
use mockchat_mockdata::MockConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::responder::ResponderConfig;

/// Runtime configuration for a chat session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session_id: String,
    /// Seed for mock data and the simulated peer; random when absent
    pub seed: Option<u64>,
    pub mock: MockConfig,
    pub responder: ResponderConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let session_id = lookup("MOCKCHAT_SESSION_ID").unwrap_or(defaults.session_id);
        let seed = parse(&lookup, "MOCKCHAT_SEED")?;
        let users = parse(&lookup, "MOCKCHAT_USERS")?.unwrap_or(defaults.mock.users);
        let groups = parse(&lookup, "MOCKCHAT_GROUPS")?.unwrap_or(defaults.mock.groups);

        let min_delay = parse(&lookup, "MOCKCHAT_REPLY_MIN_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.responder.min_delay);
        let max_delay = parse(&lookup, "MOCKCHAT_REPLY_MAX_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.responder.max_delay);
        if max_delay < min_delay {
            bail!("MOCKCHAT_REPLY_MAX_MS ({max_delay:?}) is below MOCKCHAT_REPLY_MIN_MS ({min_delay:?})");
        }

        Ok(Self {
            session_id,
            seed,
            mock: MockConfig { users, groups },
            responder: ResponderConfig {
                min_delay,
                max_delay,
            },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            seed: None,
            mock: MockConfig::default(),
            responder: ResponderConfig::default(),
        }
    }
}

fn parse<F, T>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("invalid value for {key}: {raw:?}"))
        })
        .transpose()
}
