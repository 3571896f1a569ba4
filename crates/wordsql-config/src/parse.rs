//! Configuration file parsing.
//!
//! Parses TOML into a `RawConfig` whose fields are all optional; [`crate::Config`] applies
//! defaults and checks required keys.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, IblConverterKind, ValueConverterKind};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Builder section.
    pub builder: Option<RawBuilderSettings>,
}

/// Raw `[builder]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawBuilderSettings {
    /// Parameterized SQL boolean expression used for every search word.
    pub template: Option<String>,
    /// Value converter applied to each search word.
    pub value: Option<ValueConverterKind>,
    /// IBL converter applied to each search word.
    pub ibl: Option<IblConverterKind>,
    /// Parser round limit.
    pub max_rounds: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.builder.is_none());
    }

    #[test]
    fn test_parse_full_builder() {
        let toml = r#"
[builder]
template = "body LIKE ?"
value = "like"
ibl = "verbatim"
max_rounds = 250
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let builder = config.builder.unwrap();
        assert_eq!(builder.template.as_deref(), Some("body LIKE ?"));
        assert_eq!(builder.value, Some(ValueConverterKind::Like));
        assert_eq!(builder.ibl, Some(IblConverterKind::Verbatim));
        assert_eq!(builder.max_rounds, Some(250));
    }

    #[test]
    fn test_parse_partial_builder() {
        let toml = r#"
[builder]
template = "c = ?"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let builder = config.builder.unwrap();
        assert!(builder.value.is_none());
        assert!(builder.ibl.is_none());
        assert!(builder.max_rounds.is_none());
    }

    #[test]
    fn test_parse_unknown_converter() {
        let toml = r#"
[builder]
value = "soundex"
"#;
        let err = parse_config_str(toml, Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn test_parse_unknown_key() {
        let toml = r#"
[builder]
templat = "c = ?"
"#;
        let err = parse_config_str(toml, Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/wordsql.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
