//! External transcoder invocation (ffmpeg).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ToolsConfig;
use crate::error::{Error, Result};

/// Media transcoder invoked once per normalization candidate.
///
/// The contract is judged by the output file, not a return value:
/// implementations either produce a non-empty file at `output` or leave it
/// absent/empty. An `Err` from [`transcode`](Self::transcode) means the tool
/// could not be executed at all.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Re-encode `input` through `filtergraph` into `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the external tool cannot be executed.
    async fn transcode(&self, input: &Path, filtergraph: &str, output: &Path) -> Result<()>;

    /// Short identifier for log lines.
    fn name(&self) -> &'static str;
}

/// [`Transcoder`] shelling out to the external `ffmpeg` binary.
///
/// # Examples
///
/// ```no_run
/// use emoji_dl::normalize::FfmpegTranscoder;
///
/// let transcoder = FfmpegTranscoder::from_path()
///     .expect("ffmpeg not found in PATH");
/// ```
#[derive(Debug)]
pub struct FfmpegTranscoder {
    binary_path: PathBuf,
}

impl FfmpegTranscoder {
    /// Create a transcoder with an explicit binary path.
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find ffmpeg in PATH.
    ///
    /// # Returns
    ///
    /// `Some(FfmpegTranscoder)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }

    /// Resolve the binary from configuration: explicit path first, then a
    /// PATH search if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSupported`] if no binary can be resolved.
    pub fn from_config(tools: &ToolsConfig) -> Result<Self> {
        if let Some(path) = &tools.ffmpeg_path {
            return Ok(Self::new(path.clone()));
        }
        if tools.search_path {
            return Self::from_path().ok_or_else(|| {
                Error::NotSupported(
                    "ffmpeg not found in PATH; install it or set ffmpeg_path".to_string(),
                )
            });
        }
        Err(Error::NotSupported(
            "no ffmpeg path configured and PATH search is disabled".to_string(),
        ))
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, filtergraph: &str, output: &Path) -> Result<()> {
        let status = Command::new(&self.binary_path)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-filter_complex")
            .arg(filtergraph)
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute ffmpeg: {e}")))?;

        // Success is judged by the output file; the caller checks it.
        if !status.success() {
            tracing::debug!(%status, input = %input.display(), "ffmpeg exited non-zero");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cli-ffmpeg"
    }
}
