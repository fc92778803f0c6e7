//! Rune bidi configuration system
//!
//! Loads resolver and tool settings from `rune.toml`, with environment
//! variables taking precedence over the file.

use rune_bidi::{BaseDirection, DepthOverflow, ResolveOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "rune.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BidiConfig {
    /// Level resolution settings
    pub resolver: ResolverConfig,
    /// Inspection tool output settings
    pub output: OutputConfig,
    /// Log filter settings
    pub logging: LoggingConfig,
}

/// Paragraph direction as written in `rune.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DirectionSetting {
    #[default]
    Auto,
    Ltr,
    Rtl,
}

impl DirectionSetting {
    /// Parse `auto`, `ltr` or `rtl`, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }
}

impl From<DirectionSetting> for BaseDirection {
    fn from(setting: DirectionSetting) -> Self {
        match setting {
            DirectionSetting::Auto => BaseDirection::Auto,
            DirectionSetting::Ltr => BaseDirection::Ltr,
            DirectionSetting::Rtl => BaseDirection::Rtl,
        }
    }
}

/// Embedding depth policy as written in `rune.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverflowSetting {
    #[default]
    Reject,
    Ignore,
}

impl OverflowSetting {
    /// Parse `reject` or `ignore`, ignoring ASCII case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "ignore" => Some(Self::Ignore),
            _ => None,
        }
    }
}

impl From<OverflowSetting> for DepthOverflow {
    fn from(setting: OverflowSetting) -> Self {
        match setting {
            OverflowSetting::Reject => DepthOverflow::Reject,
            OverflowSetting::Ignore => DepthOverflow::Ignore,
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Paragraph direction used when the command line gives none
    pub base_direction: DirectionSetting,
    /// Behaviour when explicit embeddings nest too deeply
    pub depth_overflow: OverflowSetting,
}

/// Output configuration for the inspection tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Mirror characters at odd levels in the reordered string
    pub mirror: bool,
    /// Print the run list
    pub show_runs: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter directive, e.g. `rune_bidi=debug`
    pub filter: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mirror: true,
            show_runs: true,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl BidiConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unrecognized values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("RUNE_BIDI_BASE_DIRECTION") {
            if let Some(direction) = DirectionSetting::parse(&val) {
                self.resolver.base_direction = direction;
            }
        }
        if let Ok(val) = std::env::var("RUNE_BIDI_DEPTH_OVERFLOW") {
            if let Some(overflow) = OverflowSetting::parse(&val) {
                self.resolver.depth_overflow = overflow;
            }
        }
        if let Ok(val) = std::env::var("RUNE_BIDI_MIRROR") {
            self.output.mirror = parse_flag(&val);
        }
        if let Ok(filter) = std::env::var("RUNE_LOG") {
            self.logging.filter = Some(filter);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from `path`, or from rune.toml (defaults if not found)
    /// 2. Override with environment variables if present
    ///
    /// An explicit `path` must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_or_default(),
        };
        config.merge_with_env();
        Ok(config)
    }

    pub fn base_direction(&self) -> BaseDirection {
        self.resolver.base_direction.into()
    }

    /// Resolver options derived from the `[resolver]` section.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            depth_overflow: self.resolver.depth_overflow.into(),
        }
    }
}
