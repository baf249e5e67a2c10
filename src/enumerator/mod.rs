//! Emoji enumeration over a two-phase platform protocol.
//!
//! The platform client is event-driven ("ready" callback), but the dump
//! engine only needs the resulting guild → emojis mapping. The trait
//! therefore exposes an explicit sequence — [`connect`], [`await_ready`],
//! [`disconnect`] — instead of inversion-of-control callbacks.
//!
//! [`connect`]: EmojiEnumerator::connect
//! [`await_ready`]: EmojiEnumerator::await_ready
//! [`disconnect`]: EmojiEnumerator::disconnect

mod discord;

pub use discord::DiscordEnumerator;

use crate::error::Result;
use crate::types::EmojiInventory;
use async_trait::async_trait;

/// Source of the guild → emojis mapping for one dump run.
///
/// Implementations authenticate against the platform and enumerate every
/// custom emoji visible to the account. No binary content is loaded during
/// enumeration.
///
/// Any error from any phase is fatal: enumeration failures surface before a
/// single fetch unit is dispatched, so a failed run never leaves partial
/// fetch work behind.
#[async_trait]
pub trait EmojiEnumerator: Send + Sync {
    /// Authenticate and establish a session with the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the platform is
    /// unreachable.
    async fn connect(&mut self) -> Result<()>;

    /// Wait for the platform to report ready, then return the complete
    /// guild → emojis mapping.
    ///
    /// Signals "enumeration complete" exactly once; guild order and
    /// within-guild emoji order are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if called before [`connect`](Self::connect) or if
    /// any enumeration request fails.
    async fn await_ready(&mut self) -> Result<EmojiInventory>;

    /// Release the session.
    ///
    /// After this the enumerator may be connected again for a fresh run.
    async fn disconnect(&mut self) -> Result<()>;
}
