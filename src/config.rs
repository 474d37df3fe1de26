//! Configuration loading.
//!
//! Reads `spinwheel.toml` (or `$SPINWHEEL_CONFIG_PATH`). Every section has
//! defaults, so a missing or empty file is valid.
//!
//! Precedence: env vars > config file > defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::risk::fleet::{
    DelayMode, SendingAccount, DEFAULT_AUTO_DELAY_SECS, DEFAULT_CONFIRM_BELOW_HEALTH,
};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "spinwheel.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Launch gate settings.
    #[serde(default)]
    pub fleet: FleetConfig,

    /// Sending accounts available to the launch gate.
    #[serde(default)]
    pub accounts: Vec<SendingAccount>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rotated JSON logs. Console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

/// How send timing is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    /// Delays drawn from `min_delay_secs..=max_delay_secs`.
    Fixed,
    /// Sender-controlled timing, modelled as `auto_delay_secs`.
    Auto,
}

impl std::str::FromStr for TimingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "auto" | "automatic" => Ok(Self::Auto),
            other => Err(anyhow::anyhow!("unknown timing mode: {other}")),
        }
    }
}

/// Launch gate settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetConfig {
    /// Timing mode for sends.
    #[serde(default = "default_timing")]
    pub timing: TimingMode,

    /// Shortest delay between messages, in seconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_secs: f64,

    /// Longest delay between messages, in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: f64,

    /// Average delay assumed in automatic timing mode.
    #[serde(default = "default_auto_delay")]
    pub auto_delay_secs: f64,

    /// Fleet health below which a launch needs confirmation.
    #[serde(default = "default_confirm_below")]
    pub confirm_below_health: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            timing: default_timing(),
            min_delay_secs: default_min_delay(),
            max_delay_secs: default_max_delay(),
            auto_delay_secs: default_auto_delay(),
            confirm_below_health: default_confirm_below(),
        }
    }
}

impl FleetConfig {
    /// Delay mode for the launch gate.
    ///
    /// An inverted fixed range is logged and read with its bounds swapped.
    pub fn delay_mode(&self) -> DelayMode {
        match self.timing {
            TimingMode::Fixed if self.min_delay_secs > self.max_delay_secs => {
                warn!(
                    min_delay_secs = self.min_delay_secs,
                    max_delay_secs = self.max_delay_secs,
                    "min delay exceeds max delay; swapping bounds"
                );
                DelayMode::Fixed {
                    min_secs: self.max_delay_secs,
                    max_secs: self.min_delay_secs,
                }
            }
            TimingMode::Fixed => DelayMode::Fixed {
                min_secs: self.min_delay_secs,
                max_secs: self.max_delay_secs,
            },
            TimingMode::Auto => DelayMode::Automatic {
                delay_secs: self.auto_delay_secs,
            },
        }
    }
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_owned()
}
fn default_timing() -> TimingMode {
    TimingMode::Fixed
}
fn default_min_delay() -> f64 {
    30.0
}
fn default_max_delay() -> f64 {
    90.0
}
fn default_auto_delay() -> f64 {
    DEFAULT_AUTO_DELAY_SECS
}
fn default_confirm_below() -> u32 {
    DEFAULT_CONFIRM_BELOW_HEALTH
}

impl Config {
    /// Load with precedence: env vars > TOML file > defaults.
    ///
    /// The file is `$SPINWHEEL_CONFIG_PATH` or `./spinwheel.toml`; a missing
    /// file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let path = config_path_with(env);
        let mut config = load_optional(&path)?;
        config.apply_overrides(env);
        Ok(config)
    }

    /// Parse a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid config.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Apply environment overrides through `env`, a variable lookup.
    ///
    /// Taking a resolver keeps tests away from the process environment.
    /// Invalid values are logged and ignored.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("SPINWHEEL_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("SPINWHEEL_LOG_DIR") {
            self.logging.dir = Some(PathBuf::from(v));
        }

        if let Some(v) = env("SPINWHEEL_TIMING") {
            match v.parse() {
                Ok(mode) => self.fleet.timing = mode,
                Err(_) => warn!(
                    var = "SPINWHEEL_TIMING",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        override_f64(&env, "SPINWHEEL_MIN_DELAY_SECS", &mut self.fleet.min_delay_secs);
        override_f64(&env, "SPINWHEEL_MAX_DELAY_SECS", &mut self.fleet.max_delay_secs);
        override_f64(&env, "SPINWHEEL_AUTO_DELAY_SECS", &mut self.fleet.auto_delay_secs);
    }
}

fn override_f64(env: &impl Fn(&str) -> Option<String>, var: &'static str, target: &mut f64) {
    let Some(v) = env(var) else {
        return;
    };
    match v.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => *target = n,
        _ => warn!(var, value = %v, "ignoring invalid env override"),
    }
}

/// Resolve the config path using a custom env resolver.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    env("SPINWHEEL_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the config at `path`, falling back to defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_optional(path: &Path) -> anyhow::Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(anyhow::anyhow!("failed to read config at {}: {e}", path.display())),
    }
}
