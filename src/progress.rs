//! Completion-tick progress rendering
//!
//! Purely observational: one tick per terminal outcome, never consulted for
//! control flow. Ticks may arrive in any completion order.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar over a known total of work units.
///
/// Draws to stderr on real terminals and stays silent otherwise, so piped
/// output only carries the run summaries.
pub struct TickProgress {
    bar: ProgressBar,
}

impl TickProgress {
    /// Create a bar for `total` units, labelled with `unit` (e.g. "emojis").
    pub fn new(total: u64, unit: &str) -> Self {
        let bar = if std::io::stderr().is_terminal() {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::bar_style());
        bar.set_message(unit.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Record one completed unit, regardless of its outcome kind.
    pub fn tick(&self) {
        self.bar.inc(1);
    }

    /// Tear the bar down, leaving the terminal clean for the summary line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{bar:30.cyan/blue} {pos}/{len} {msg} ({elapsed} elapsed, ETA {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate_to_total() {
        let progress = TickProgress::new(7, "emojis");
        for _ in 0..7 {
            progress.tick();
        }
        assert_eq!(progress.bar.position(), 7);
        progress.finish();
    }

    #[test]
    fn out_of_order_ticks_are_just_ticks() {
        // Completion order is arbitrary under concurrency; the bar only
        // counts terminal outcomes.
        let progress = TickProgress::new(3, "emojis");
        progress.tick();
        progress.tick();
        assert_eq!(progress.bar.position(), 2);
        progress.tick();
        assert_eq!(progress.bar.position(), 3);
        progress.finish();
    }
}
