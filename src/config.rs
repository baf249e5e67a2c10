//! Configuration types for emoji-dl

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Dump behavior configuration (output directory, concurrency, transport)
///
/// Groups settings related to how emojis are fetched and stored.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Directory emojis are written to (default: the per-user data
    /// directory, e.g. `~/.local/share/emoji-dl`)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum concurrent CDN transfers (default: 8)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,

    /// User-Agent header sent on CDN requests (default: "Mozilla/5.0")
    ///
    /// The CDN answers 403 to default client identifiers, so a browser-like
    /// value is required.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Transport retry behavior for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_concurrent_downloads: default_max_concurrent(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl DumpConfig {
    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// External tool paths (ffmpeg)
///
/// Groups settings for external binaries. Used as a nested sub-config within
/// [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set
    /// (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Retry configuration for transient transport failures
///
/// The per-request retry count is fixed low (2) — a CDN object that fails
/// three times in a row is recorded as a failed unit, not retried forever.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retry attempts after the initial try (default: 2)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (default: 250ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay: Duration,

    /// Upper bound on any single retry delay (default: 5s)
    #[serde(default = "default_max_delay")]
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each failed attempt
    /// (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays to avoid thundering herd (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Main configuration for [`crate::EmojiDumper`]
///
/// Fields are organized into logical sub-configs:
/// - [`dump`](DumpConfig) — output directory, concurrency, transport
/// - [`tools`](ToolsConfig) — external binary paths
///
/// All sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays un-nested.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dump behavior settings
    #[serde(flatten)]
    pub dump: DumpConfig,

    /// External tool paths
    #[serde(flatten)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Output directory emojis are written to
    pub fn output_dir(&self) -> &PathBuf {
        &self.dump.output_dir
    }
}

fn default_output_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("emoji-dl"))
        .unwrap_or_else(|| PathBuf::from("./emojis"))
}

fn default_max_concurrent() -> usize {
    8
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    2
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(250)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}
