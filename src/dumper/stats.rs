//! Run statistics accumulation and the end-of-run summary.

use std::time::Duration;

use indicatif::HumanBytes;

use crate::types::FetchOutcome;

/// Aggregate counters for one dump run.
///
/// Created zeroed when the run starts, incremented from the single
/// outcome-consuming loop as units complete (increments are commutative, so
/// completion order never changes the final totals), finalized with the
/// elapsed wall time when the stream is fully drained.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DumpStats {
    /// Total fetch units considered, known up front from enumeration
    pub total_units: usize,
    /// Number of guilds that contributed units
    pub guild_count: usize,
    /// Units skipped because the target file already existed
    pub skipped: usize,
    /// Units whose body was fetched and written
    pub downloaded: usize,
    /// Units that failed (network, status, or local I/O)
    pub failed: usize,
    /// Total bytes written across downloaded units
    pub bytes_downloaded: u64,
    /// Wall time from first dispatch to last terminal outcome
    pub elapsed: Duration,
}

impl DumpStats {
    /// Zeroed statistics for a run over `total_units` units from
    /// `guild_count` guilds.
    pub fn new(total_units: usize, guild_count: usize) -> Self {
        Self {
            total_units,
            guild_count,
            ..Self::default()
        }
    }

    /// Fold one terminal outcome into the totals.
    pub fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Skipped => self.skipped += 1,
            FetchOutcome::Downloaded(bytes) => {
                self.downloaded += 1;
                self.bytes_downloaded += bytes;
            }
            FetchOutcome::Failed => self.failed += 1,
        }
    }

    /// Number of units that reached a terminal outcome so far.
    pub fn completed(&self) -> usize {
        self.skipped + self.downloaded + self.failed
    }

    /// Bytes per second over the whole run (zero when no time elapsed).
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes_downloaded as f64 / secs
        } else {
            0.0
        }
    }

    /// Human-readable end-of-run summary line.
    pub fn summary(&self) -> String {
        format!(
            "Updated {} emojis from {} servers in {:.3}s. {} downloaded ({}/s). \
             {} downloaded from possible {} ({} skipped, {} failed)",
            self.total_units,
            self.guild_count,
            self.elapsed.as_secs_f64(),
            HumanBytes(self.bytes_downloaded),
            HumanBytes(self.throughput() as u64),
            self.downloaded,
            self.total_units,
            self.skipped,
            self.failed,
        )
    }
}
