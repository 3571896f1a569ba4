//! Configuration for wordsql search word builders.
//!
//! A configuration is a TOML document with a single `[builder]` section:
//!
//! ```toml
//! [builder]
//! template = "body LIKE ?"   # required
//! value = "like"             # "identity" (default) or "like"
//! ibl = "strip"              # "strip" (default) or "verbatim"
//! max_rounds = 100           # parser round limit
//! ```

#![warn(missing_docs)]

mod error;
mod parse;
mod validate;

use std::path::Path;

pub use error::ConfigError;
pub use parse::{RawBuilderSettings, RawConfig, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use validate::ConfigWarning;
use validate::validate_config;
use wordsql_query::DEFAULT_MAX_ROUNDS;

/// Path reported in errors for configuration that did not come from a file.
const INLINE_SOURCE: &str = "<inline>";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Builder settings.
    pub builder: BuilderSettings,
}

impl Config {
    /// Loads and resolves a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        Self::from_raw(raw, path)
    }

    /// Parses and resolves configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let path = Path::new(INLINE_SOURCE);
        let raw = parse_config_str(contents, path)?;
        Self::from_raw(raw, path)
    }

    /// Applies defaults to a raw configuration and checks required settings.
    ///
    /// `path` is only used for error reporting.
    pub fn from_raw(raw: RawConfig, path: &Path) -> Result<Self, ConfigError> {
        let raw = raw.builder.unwrap_or_default();
        let defaults = BuilderSettings::default();

        let template = raw
            .template
            .filter(|template| !template.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingTemplate {
                path: path.to_path_buf(),
            })?;

        let max_rounds = raw.max_rounds.unwrap_or(defaults.max_rounds);
        if max_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                key: "builder.max_rounds",
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            builder: BuilderSettings {
                template,
                value: raw.value.unwrap_or(defaults.value),
                ibl: raw.ibl.unwrap_or(defaults.ibl),
                max_rounds,
            },
        })
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective configuration to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Settings for one search word builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuilderSettings {
    /// Parameterized SQL boolean expression used for every search word.
    pub template: String,
    /// Value converter applied to each search word.
    pub value: ValueConverterKind,
    /// IBL converter applied to each search word.
    pub ibl: IblConverterKind,
    /// Parser round limit.
    pub max_rounds: usize,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            template: String::new(),
            value: ValueConverterKind::default(),
            ibl: IblConverterKind::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Built-in value converters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueConverterKind {
    /// Bind each word unchanged.
    #[default]
    Identity,
    /// Escape LIKE metacharacters, map `*` to `%` and wrap in `%...%`.
    Like,
}

/// Built-in IBL converters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IblConverterKind {
    /// Strip boolean-mode operator characters from each word.
    #[default]
    Strip,
    /// Use each word unchanged.
    Verbatim,
}
