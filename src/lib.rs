//! # emoji-dl
//!
//! Dumps every custom emoji visible to an authenticated Discord account to a
//! local directory, then optionally re-encodes the dumped files to a uniform
//! size with ffmpeg.
//!
//! ## Design Philosophy
//!
//! - **Bounded concurrency** - at most 8 CDN transfers in flight, topped up
//!   as soon as any one completes
//! - **Incremental by default** - emojis already on disk are skipped unless a
//!   refresh is forced
//! - **Partial failures stay partial** - a single emoji failing never aborts
//!   the run; only enumeration and normalization failures are fatal
//! - **Library-first** - the `emoji-dl` binary is thin glue over this crate
//!
//! ## Quick Start
//!
//! ```no_run
//! use emoji_dl::{Config, DiscordEnumerator, EmojiDumper};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let mut enumerator = DiscordEnumerator::new("token".to_string())?;
//!     let mut dumper = EmojiDumper::new(config)?;
//!
//!     let stats = dumper.dump(&mut enumerator, false).await?;
//!     println!("{}", stats.summary());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core dump engine (decomposed into focused submodules)
pub mod dumper;
/// Emoji enumeration (two-phase platform protocol)
pub mod enumerator;
/// Error types
pub mod error;
/// Post-dump size normalization via an external transcoder
pub mod normalize;
/// Completion-tick progress rendering
pub mod progress;
/// Retry logic for transient transport failures
pub mod retry;
/// Filename slug derivation
pub mod slug;
/// Plugin config template rendering
pub mod template;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DumpConfig, RetryConfig, ToolsConfig};
pub use dumper::{DumpStats, EmojiDumper, FetchUnit};
pub use enumerator::{DiscordEnumerator, EmojiEnumerator};
pub use error::{Error, NormalizeError, Result};
pub use normalize::{FfmpegTranscoder, NormalizeStats, Transcoder};
pub use types::{Emoji, EmojiInventory, FetchOutcome, GuildEmojis};
