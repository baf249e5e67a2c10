//! Shared helpers for dump engine tests.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, RetryConfig};
use crate::enumerator::EmojiEnumerator;
use crate::error::{Error, Result};
use crate::types::{Emoji, EmojiInventory, GuildEmojis};

use super::EmojiDumper;

/// Enumerator over a fixed, pre-built inventory.
///
/// Tracks the two-phase protocol so tests can assert it is followed:
/// `await_ready` before `connect` is an error, like the real enumerator.
pub(crate) struct StaticEnumerator {
    inventory: EmojiInventory,
    connected: bool,
}

impl StaticEnumerator {
    pub(crate) fn new(inventory: EmojiInventory) -> Self {
        Self {
            inventory,
            connected: false,
        }
    }
}

#[async_trait]
impl EmojiEnumerator for StaticEnumerator {
    async fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    async fn await_ready(&mut self) -> Result<EmojiInventory> {
        if !self.connected {
            return Err(Error::Enumeration("not connected".to_string()));
        }
        Ok(self.inventory.clone())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }
}

/// Build an emoji pointing at `base_url/emojis/<name>.<suffix>`.
pub(crate) fn emoji(base_url: &str, name: &str, animated: bool) -> Emoji {
    let suffix = if animated { "gif" } else { "png" };
    Emoji {
        name: name.to_string(),
        url: format!("{base_url}/emojis/{name}.{suffix}"),
        animated,
    }
}

/// Build a guild from `(name, emojis)`.
pub(crate) fn guild(name: &str, emojis: Vec<Emoji>) -> GuildEmojis {
    GuildEmojis {
        guild: name.to_string(),
        emojis,
    }
}

/// Canonical mixed inventory: 3 guilds holding 2, 0, and 5 emojis.
pub(crate) fn three_guild_inventory(base_url: &str) -> EmojiInventory {
    EmojiInventory {
        guilds: vec![
            guild(
                "Alpha Team",
                vec![
                    emoji(base_url, "smile", false),
                    emoji(base_url, "party", true),
                ],
            ),
            guild("Quiet Corner", vec![]),
            guild(
                "Gamma Guild",
                vec![
                    emoji(base_url, "wave", false),
                    emoji(base_url, "think", false),
                    emoji(base_url, "dance", true),
                    emoji(base_url, "sleep", false),
                    emoji(base_url, "fire", false),
                ],
            ),
        ],
    }
}

/// Config tuned for tests: tiny retry delays, short timeout.
pub(crate) fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.dump.output_dir = output_dir.to_path_buf();
    config.dump.request_timeout_secs = 5;
    config.dump.retry = RetryConfig {
        max_attempts: 2,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    };
    config
}

/// A dumper writing into `output_dir`, with test-friendly retry timing.
pub(crate) fn test_dumper(output_dir: &Path) -> EmojiDumper {
    EmojiDumper::new(test_config(output_dir)).unwrap()
}
