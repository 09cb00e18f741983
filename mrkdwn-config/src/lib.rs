//! Shared configuration loader for the mrkdwn toolchain.
//!
//! `defaults/mrkdwn.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MrkdwnConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mrkdwn_render::common::links::SpecialLinkRules;
use mrkdwn_render::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mrkdwn.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "mrkdwn.toml";

/// Top-level configuration consumed by mrkdwn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MrkdwnConfig {
    pub render: RenderConfig,
    pub links: LinksConfig,
    pub lists: ListsConfig,
    pub dates: DatesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub exact_mode: bool,
}

/// Mention detection knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    pub min_id_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListsConfig {
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatesConfig {
    pub default_format: String,
}

impl From<&MrkdwnConfig> for RenderOptions {
    fn from(config: &MrkdwnConfig) -> Self {
        RenderOptions {
            exact_mode: config.render.exact_mode,
            links: SpecialLinkRules {
                min_id_length: config.links.min_id_length,
            },
            bullets: config.lists.bullets.clone(),
            default_time_format: config.dates.default_format.clone(),
            now: None,
        }
    }
}

impl From<MrkdwnConfig> for RenderOptions {
    fn from(config: MrkdwnConfig) -> Self {
        RenderOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MrkdwnConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MrkdwnConfig, ConfigError> {
    Loader::new().build()
}
