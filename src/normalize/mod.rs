//! Post-dump size normalization.
//!
//! Re-encodes previously dumped emojis to a uniform square dimension through
//! an external transcoder, one file at a time. Each candidate is transcoded
//! to a temporary sibling first and only swapped over the original when the
//! result is non-empty; a missing or empty result aborts the whole pass,
//! since a silently-missing emoji is worse than an unconverted one.

mod transcoder;

pub use transcoder::{FfmpegTranscoder, Transcoder};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error::{Error, NormalizeError, Result};
use crate::progress::TickProgress;

/// Counters for one normalization pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeStats {
    /// Files transcoded and swapped over their originals
    pub processed: usize,
    /// Recognized files left untouched because they predate the cutoff
    pub skipped: usize,
    /// Wall time for the whole pass
    pub elapsed: Duration,
}

impl NormalizeStats {
    /// Human-readable end-of-pass summary line.
    pub fn summary(&self) -> String {
        format!(
            "Normalized {} emojis in {:.3}s ({} skipped, {} processed)",
            self.processed + self.skipped,
            self.elapsed.as_secs_f64(),
            self.skipped,
            self.processed,
        )
    }
}

/// Re-encode every eligible emoji under `dir` to `size`x`size` pixels.
///
/// Candidates are regular files with a `png` or `gif` suffix. When
/// `not_before` is given, files created before it are skipped untouched so a
/// pass chained after a dump only touches that dump's output; `None` (the
/// standalone invocation) treats every recognized file as a candidate. The
/// creation timestamp falls back to the modification time on filesystems
/// that do not record birth time.
///
/// Strictly sequential: one transcode at a time, each mutating the shared
/// directory destructively (delete + rename).
///
/// # Errors
///
/// Returns an error if `size` is zero, if the directory cannot be read, if
/// the transcoder cannot be executed, or if a transcode produces a missing
/// or empty output file. The last case aborts the pass with the original
/// file left in place.
pub async fn normalize_directory(
    transcoder: &dyn Transcoder,
    dir: &Path,
    size: u32,
    not_before: Option<DateTime<Utc>>,
) -> Result<NormalizeStats> {
    if size == 0 {
        return Err(Error::Config {
            message: "normalize size must be positive (64-128 recommended)".to_string(),
            key: Some("size".to_string()),
        });
    }

    let start = Instant::now();
    let mut stats = NormalizeStats::default();

    // Snapshot the directory first so temp siblings created mid-pass are
    // never picked up as candidates themselves.
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        entries.push(entry?.path());
    }

    tracing::info!(
        dir = %dir.display(),
        size,
        entries = entries.len(),
        cutoff = ?not_before,
        backend = transcoder.name(),
        "starting normalization pass"
    );

    let progress = TickProgress::new(entries.len() as u64, "emojis");
    for path in entries {
        let result = normalize_file(transcoder, &path, size, not_before, &mut stats).await;
        progress.tick();
        if let Err(e) = result {
            progress.finish();
            return Err(e);
        }
    }
    progress.finish();

    stats.elapsed = start.elapsed();
    tracing::info!(
        processed = stats.processed,
        skipped = stats.skipped,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "normalization pass complete"
    );
    Ok(stats)
}

/// Transcode one directory entry if it is a candidate.
async fn normalize_file(
    transcoder: &dyn Transcoder,
    path: &Path,
    size: u32,
    not_before: Option<DateTime<Utc>>,
    stats: &mut NormalizeStats,
) -> Result<()> {
    let Some(animated) = recognized_suffix(path) else {
        return Ok(());
    };
    if !path.is_file() {
        return Ok(());
    }

    if let Some(cutoff) = not_before {
        if created_at(path)? < cutoff {
            // not created by this run, leave it alone
            stats.skipped += 1;
            return Ok(());
        }
    }

    let temp = temp_sibling(path);
    transcoder
        .transcode(path, &filtergraph(size, animated), &temp)
        .await?;

    match std::fs::metadata(&temp) {
        Err(_) => {
            return Err(NormalizeError::MissingOutput { path: temp }.into());
        }
        Ok(metadata) if metadata.len() == 0 => {
            return Err(NormalizeError::EmptyOutput { path: temp }.into());
        }
        Ok(_) => {}
    }

    // Atomic from the directory's perspective: the original name either
    // points at the old bytes or the fully-written new ones.
    std::fs::remove_file(path)
        .and_then(|()| std::fs::rename(&temp, path))
        .map_err(|e| NormalizeError::ReplaceFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    stats.processed += 1;
    Ok(())
}

/// `Some(animated)` for recognized emoji suffixes, `None` otherwise.
fn recognized_suffix(path: &Path) -> Option<bool> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => Some(false),
        Some("gif") => Some(true),
        _ => None,
    }
}

/// Creation time, falling back to mtime where birth time is unavailable.
fn created_at(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let metadata = std::fs::metadata(path)?;
    let time = metadata.created().or_else(|_| metadata.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// Temporary sibling path: `<stem>_temp.<ext>`, same directory.
fn temp_sibling(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("emoji");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("tmp");
    path.with_file_name(format!("{stem}_temp.{ext}"))
}

/// ffmpeg filter-graph: Lanczos scale to the target height with the width
/// auto-computed, plus an explicit two-pass palette for GIFs.
///
/// Without an explicit palette ffmpeg re-encodes GIFs against a reduced
/// default palette with no transparency slot, destroying transparency.
fn filtergraph(size: u32, animated: bool) -> String {
    let scale = format!("[0:v]scale=-1:{size}:flags=lanczos");
    if animated {
        format!("{scale},split [a][b];[a]palettegen [p];[b][p]paletteuse")
    } else {
        scale
    }
}
