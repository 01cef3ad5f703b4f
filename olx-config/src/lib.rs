//! Shared configuration loader for the olx toolchain.
//!
//! `defaults/olx.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`OlxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use olx_babel::{ConvertOptions, TraceOptions};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/olx.default.toml");

/// Top-level configuration consumed by olx applications.
#[derive(Debug, Clone, Deserialize)]
pub struct OlxConfig {
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
    pub log: LogConfig,
}

/// Conversion behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub strict: bool,
    pub trailing_newline: bool,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            strict: config.strict,
        }
    }
}

/// Controls `inspect` output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub view: InspectView,
    pub include_unchanged: bool,
}

impl From<&InspectConfig> for TraceOptions {
    fn from(config: &InspectConfig) -> Self {
        TraceOptions {
            include_unchanged: config.include_unchanged,
            stage: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum InspectView {
    #[serde(rename = "stages")]
    Stages,
    #[serde(rename = "stages-json")]
    StagesJson,
    #[serde(rename = "response-types")]
    ResponseTypes,
    #[serde(rename = "problem-type")]
    ProblemType,
}

impl InspectView {
    pub const ALL: [InspectView; 4] = [
        InspectView::Stages,
        InspectView::StagesJson,
        InspectView::ResponseTypes,
        InspectView::ProblemType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InspectView::Stages => "stages",
            InspectView::StagesJson => "stages-json",
            InspectView::ResponseTypes => "response-types",
            InspectView::ProblemType => "problem-type",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.name() == name)
    }
}

impl fmt::Display for InspectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `env_logger` filter directive, e.g. `warn` or `olx_babel=debug`
    pub level: String,
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
    pub fn build(self) -> Result<OlxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<OlxConfig, ConfigError> {
    Loader::new().build()
}
