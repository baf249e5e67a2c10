//! The bounded-concurrency fetch engine.
//!
//! Units are driven through a `buffer_unordered` stream: at most
//! `max_concurrent_downloads` transfers are outstanding at any instant, and
//! the next unit is dispatched as soon as any in-flight one completes. The
//! stream consumer is the single point where outcomes are folded into
//! [`DumpStats`] and the progress bar is ticked, so no shared mutable
//! counters are touched from concurrent contexts.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use futures::StreamExt;
use futures::stream;
use reqwest::header::USER_AGENT;

use crate::config::RetryConfig;
use crate::enumerator::EmojiEnumerator;
use crate::error::Result;
use crate::progress::TickProgress;
use crate::retry::with_retry;
use crate::types::{EmojiInventory, FetchOutcome};

use super::EmojiDumper;
use super::stats::DumpStats;
use super::units::{FetchUnit, fetch_units};

impl EmojiDumper {
    /// Run a full dump: enumerate via `enumerator`, then fetch every emoji.
    ///
    /// Enumeration failures are fatal and surface before any fetch work
    /// begins. Per-unit fetch failures are recorded in the returned stats and
    /// never abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration fails or the output directory cannot
    /// be created.
    pub async fn dump<E>(&mut self, enumerator: &mut E, force_refresh: bool) -> Result<DumpStats>
    where
        E: EmojiEnumerator + ?Sized,
    {
        self.dump_start_time = Some(Utc::now());

        enumerator.connect().await?;
        let inventory = enumerator.await_ready().await?;
        enumerator.disconnect().await?;

        self.run_fetch(&inventory, force_refresh).await
    }

    /// Fetch every emoji in an already-enumerated inventory.
    ///
    /// Same engine as [`dump`](Self::dump) without the enumeration phase;
    /// callers that assembled the inventory themselves start here.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created.
    pub async fn dump_inventory(
        &mut self,
        inventory: &EmojiInventory,
        force_refresh: bool,
    ) -> Result<DumpStats> {
        self.dump_start_time = Some(Utc::now());
        self.run_fetch(inventory, force_refresh).await
    }

    async fn run_fetch(
        &self,
        inventory: &EmojiInventory,
        force_refresh: bool,
    ) -> Result<DumpStats> {
        let output_dir = &self.config.dump.output_dir;
        tokio::fs::create_dir_all(output_dir).await?;

        let start = Instant::now();
        let mut stats = DumpStats::new(inventory.emoji_count(), inventory.guild_count());
        let progress = TickProgress::new(stats.total_units as u64, "emojis");

        tracing::info!(
            emojis = stats.total_units,
            guilds = stats.guild_count,
            force_refresh,
            output_dir = %output_dir.display(),
            "starting dump"
        );

        let ceiling = self.config.dump.max_concurrent_downloads.max(1);
        let mut outcomes = stream::iter(fetch_units(inventory, output_dir))
            .map(|unit| {
                let client = self.client.clone();
                let retry = self.config.dump.retry.clone();
                let user_agent = self.config.dump.user_agent.clone();
                async move { fetch_one(client, retry, user_agent, unit, force_refresh).await }
            })
            .buffer_unordered(ceiling);

        // Single consuming loop: the stream is fully drained before the
        // statistics are finalized, so no in-flight unit is orphaned.
        while let Some((unit, outcome)) = outcomes.next().await {
            tracing::debug!(emoji = %unit.label(), ?outcome, "unit complete");
            stats.record(outcome);
            progress.tick();
        }
        drop(outcomes);

        progress.finish();
        stats.elapsed = start.elapsed();

        tracing::info!(
            downloaded = stats.downloaded,
            skipped = stats.skipped,
            failed = stats.failed,
            bytes = stats.bytes_downloaded,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "dump complete"
        );
        Ok(stats)
    }
}

/// Fetch one unit to its terminal outcome.
///
/// Never returns an error: every failure mode is folded into
/// [`FetchOutcome::Failed`] so a bad unit cannot abort the run or cancel its
/// siblings.
async fn fetch_one(
    client: reqwest::Client,
    retry: RetryConfig,
    user_agent: String,
    unit: FetchUnit,
    force_refresh: bool,
) -> (FetchUnit, FetchOutcome) {
    if !force_refresh && unit.target.exists() {
        return (unit, FetchOutcome::Skipped);
    }

    // Can the target even be created? Failing here saves the round-trip.
    if let Err(e) = probe_writable(&unit.target).await {
        tracing::warn!(emoji = %unit.label(), error = %e, "target not writable");
        return (unit, FetchOutcome::Failed);
    }

    // The CDN answers 403 to default client identifiers, hence the
    // browser-like User-Agent.
    let response = match with_retry(&retry, || {
        client
            .get(unit.url.as_str())
            .header(USER_AGENT, user_agent.as_str())
            .send()
    })
    .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(emoji = %unit.label(), error = %e, "CDN request failed");
            return (unit, FetchOutcome::Failed);
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(emoji = %unit.label(), %status, "CDN answered non-success");
        return (unit, FetchOutcome::Failed);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(emoji = %unit.label(), error = %e, "failed reading response body");
            return (unit, FetchOutcome::Failed);
        }
    };

    match tokio::fs::write(&unit.target, &body).await {
        Ok(()) => {
            let outcome = FetchOutcome::Downloaded(body.len() as u64);
            (unit, outcome)
        }
        Err(e) => {
            tracing::warn!(emoji = %unit.label(), error = %e, "failed writing target file");
            (unit, FetchOutcome::Failed)
        }
    }
}

/// Best-effort writability check: create the target, then remove it.
///
/// Also clears any stale file when a refresh is forced, so the later write
/// always starts from a clean slate.
async fn probe_writable(target: &Path) -> std::io::Result<()> {
    tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(target)
        .await?;
    tokio::fs::remove_file(target).await
}
