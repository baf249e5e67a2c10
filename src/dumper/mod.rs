//! Core dump engine split into focused submodules.
//!
//! The `EmojiDumper` struct and its methods are organized by domain:
//! - [`units`] - inventory flattening and target-path derivation
//! - [`fetch`] - the bounded-concurrency fetch engine
//! - [`stats`] - outcome aggregation and the end-of-run summary

mod fetch;
mod stats;
mod units;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use stats::DumpStats;
pub use units::{FetchUnit, fetch_units};

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;

/// Drives one dump run: enumeration, bounded-concurrency fetching, and
/// outcome aggregation.
///
/// Holds the shared HTTP client used for all CDN transfers and remembers when
/// the last dump started, so a follow-up normalization pass can leave files
/// from earlier runs untouched.
pub struct EmojiDumper {
    config: Config,
    client: reqwest::Client,
    dump_start_time: Option<DateTime<Utc>>,
}

impl EmojiDumper {
    /// Create a dumper from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.dump.request_timeout())
            .build()?;
        Ok(Self {
            config,
            client,
            dump_start_time: None,
        })
    }

    /// The configuration this dumper was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// When the most recent dump started, if one has run.
    ///
    /// Used as the creation-time cutoff for
    /// [`normalize_directory`](crate::normalize::normalize_directory).
    pub fn dump_start_time(&self) -> Option<DateTime<Utc>> {
        self.dump_start_time
    }
}
