//! Configuration management for playback.
//!
//! Supports loading configuration from TOML files with a precedence system:
//! - Bundled defaults (include_str! from beatline.toml)
//! - User overrides (~/.config/beatline/beatline.toml, then ./beatline.toml)
//! - Automatic merging with user values taking precedence

use beatline_capability::ChatCompletionSettings;
use beatline_error::{BeatlineError, BeatlineResult, ConfigError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../beatline.toml");

/// Knobs for the answer loop and the event channel.
///
/// Every limit is optional; when unset, waits and retries are unbounded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Getters)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Give up on a choice after this many unmatched answers; 0 means no limit
    max_answer_attempts: Option<u32>,
    /// Seconds to wait for input before prompting again
    input_timeout_secs: Option<f64>,
    /// Seconds to wait for an analyzer before prompting again
    analysis_timeout_secs: Option<f64>,
    /// How often UI readiness and animation state are polled
    ui_poll_interval_ms: u64,
    /// Buffered lifecycle events per subscriber
    event_capacity: usize,
    /// Registry name of the default analyzer
    default_analyzer: Option<String>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            max_answer_attempts: None,
            input_timeout_secs: None,
            analysis_timeout_secs: None,
            ui_poll_interval_ms: 16,
            event_capacity: 64,
            default_analyzer: None,
        }
    }
}

fn seconds(value: Option<f64>) -> Option<Duration> {
    value.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

impl PlaybackSettings {
    /// Builder method to cap answer attempts.
    pub fn with_max_answer_attempts(mut self, attempts: u32) -> Self {
        self.max_answer_attempts = Some(attempts);
        self
    }

    /// Builder method to bound input waits.
    pub fn with_input_timeout(mut self, timeout: Duration) -> Self {
        self.input_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    /// Builder method to bound analyzer waits.
    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    /// Builder method to set the UI poll interval.
    pub fn with_ui_poll_interval_ms(mut self, millis: u64) -> Self {
        self.ui_poll_interval_ms = millis;
        self
    }

    /// Builder method to name the default analyzer.
    pub fn with_default_analyzer(mut self, name: impl Into<String>) -> Self {
        self.default_analyzer = Some(name.into());
        self
    }

    /// Attempt cap for the answer loop, if any. Zero counts as unbounded.
    pub fn attempt_limit(&self) -> Option<u32> {
        self.max_answer_attempts.filter(|&attempts| attempts > 0)
    }

    /// Input wait limit, if any.
    pub fn input_timeout(&self) -> Option<Duration> {
        seconds(self.input_timeout_secs)
    }

    /// Analyzer wait limit, if any.
    pub fn analysis_timeout(&self) -> Option<Duration> {
        seconds(self.analysis_timeout_secs)
    }

    /// UI poll interval, never shorter than one millisecond.
    pub fn ui_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui_poll_interval_ms.max(1))
    }
}

/// Top-level Beatline configuration.
///
/// Loads configuration from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from beatline.toml)
/// 2. User config in home directory (~/.config/beatline/beatline.toml)
/// 3. User config in current directory (./beatline.toml)
///
/// # Example
///
/// ```no_run
/// use beatline_narrative::BeatlineConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BeatlineConfig::load()?;
/// println!("Poll every {:?}", config.playback.ui_poll_interval());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct BeatlineConfig {
    /// Answer loop and event settings
    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Remote analyzer settings
    #[serde(default)]
    pub analyzer: ChatCompletionSettings,
}

impl BeatlineConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> BeatlineResult<Self> {
        debug!("Loading configuration from file");
        let path = path.as_ref();
        build_and_deserialize(
            Config::builder().add_source(File::from(path)),
            &path.display().to_string(),
        )
    }

    /// Parse configuration from TOML text layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(toml: &str) -> BeatlineResult<Self> {
        build_and_deserialize(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(toml, FileFormat::Toml)),
            "inline TOML",
        )
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// User config files are optional and will be silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> BeatlineResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::home_dir() {
            let home_config = config_dir.join(".config/beatline/beatline.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("beatline").required(false));
        build_and_deserialize(builder, "layered sources")
    }
}

fn build_and_deserialize(
    builder: ConfigBuilder<DefaultState>,
    origin: &str,
) -> BeatlineResult<BeatlineConfig> {
    let failure = |stage: &str, error: config::ConfigError| {
        BeatlineError::from(ConfigError::new(format!(
            "Failed to {stage} configuration from {origin}: {error}"
        )))
    };

    builder
        .build()
        .map_err(|e| failure("read", e))?
        .try_deserialize()
        .map_err(|e| failure("parse", e))
}
