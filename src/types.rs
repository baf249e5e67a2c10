//! Core types for emoji-dl

use serde::{Deserialize, Serialize};

/// One custom emoji as reported by the platform
///
/// Borrowed by the fetch engine for the duration of a single fetch unit;
/// never mutated after enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Emoji display name as shown on the platform
    pub name: String,
    /// CDN URL the binary content is fetched from
    pub url: String,
    /// Whether the emoji is animated (GIF) or static (PNG)
    pub animated: bool,
}

impl Emoji {
    /// File suffix for this emoji's content kind
    ///
    /// All platform emojis are either GIF or PNG.
    pub fn suffix(&self) -> &'static str {
        if self.animated { "gif" } else { "png" }
    }
}

/// All emojis of a single guild, in platform order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildEmojis {
    /// Guild display name
    pub guild: String,
    /// The guild's emojis, in enumeration order
    pub emojis: Vec<Emoji>,
}

/// The complete guild → emojis mapping produced by one enumeration
///
/// Guild order and within-guild emoji order are preserved; order only
/// matters for deterministic progress reporting, not correctness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiInventory {
    /// Enumerated guilds, in enumeration order
    pub guilds: Vec<GuildEmojis>,
}

impl EmojiInventory {
    /// Number of enumerated guilds
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    /// Total number of emojis across all guilds
    pub fn emoji_count(&self) -> usize {
        self.guilds.iter().map(|g| g.emojis.len()).sum()
    }

    /// True if no guild contributed any emoji
    pub fn is_empty(&self) -> bool {
        self.emoji_count() == 0
    }
}

/// Terminal outcome of one fetch unit
///
/// Exactly one outcome is produced per unit; the engine never retries a unit
/// beyond the transport-level retry count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Target file already existed and no refresh was forced; no network
    /// access was attempted
    Skipped,
    /// Body fetched and written, carrying the byte count
    Downloaded(u64),
    /// Network error, non-success status, or local I/O error; the run
    /// continues
    Failed,
}

impl FetchOutcome {
    /// Bytes transferred for this outcome (zero unless downloaded)
    pub fn bytes(&self) -> u64 {
        match self {
            FetchOutcome::Downloaded(bytes) => *bytes,
            _ => 0,
        }
    }
}
