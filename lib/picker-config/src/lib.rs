mod env_overrides;
pub mod log;

use std::{collections::HashSet, path::Path};

use config::{Config, File, FileFormat};
use envconfig::Envconfig;
use graphql_schema_picker::{FilterConfig, TypeFilter};
use serde::Deserialize;

use crate::{
    env_overrides::{EnvVarOverrides, EnvVarOverridesError},
    log::LoggingConfig,
};

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PickerConfig {
    #[serde(default)]
    pub log: LoggingConfig,

    /// One entry per type that is renamed or has fields removed.
    #[serde(default, rename = "type")]
    pub types: Vec<TypeConfig>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    /// The name of the type in the source schema.
    pub name: String,

    /// The name the type gets in the produced schema. Empty means no rename.
    #[serde(default)]
    pub new_name: Option<String>,

    /// Fields of the type to leave out of the produced schema.
    #[serde(default)]
    pub deny_list: Vec<String>,
}

impl TypeConfig {
    fn new_name(&self) -> Option<&str> {
        self.new_name.as_deref().filter(|name| !name.is_empty())
    }
}

impl PickerConfig {
    /// The per-type rules, keyed by source type name.
    pub fn filter_config(&self) -> FilterConfig {
        self.types
            .iter()
            .map(|entry| {
                let mut filter = TypeFilter::deny(entry.deny_list.iter().cloned());
                filter.new_name = entry.new_name().map(str::to_string);

                (entry.name.clone(), filter)
            })
            .collect()
    }

    fn validate(self) -> Result<Self, PickerConfigError> {
        let mut seen = HashSet::new();

        for (index, entry) in self.types.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(PickerConfigError::MissingTypeName(index));
            }

            if !seen.insert(entry.name.as_str()) {
                return Err(PickerConfigError::DuplicateTypeEntry(entry.name.clone()));
            }

            if let Some(new_name) = entry.new_name() {
                if !is_valid_name(new_name) {
                    return Err(PickerConfigError::InvalidNewName {
                        name: entry.name.clone(),
                        new_name: new_name.to_string(),
                    });
                }
            }
        }

        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PickerConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Failed to apply configuration overrides: {0}")]
    EnvVarOverridesError(#[from] EnvVarOverridesError),
    #[error("Failed to load the environment variables: {0}")]
    EnvVarLoadError(#[from] envconfig::Error),
    #[error("Type entry #{0} has an empty name")]
    MissingTypeName(usize),
    #[error("Type '{0}' is configured more than once")]
    DuplicateTypeEntry(String),
    #[error("Type '{name}' has an invalid new_name '{new_name}'")]
    InvalidNewName { name: String, new_name: String },
}

/// `/[_A-Za-z][_0-9A-Za-z]*/`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Loads the configuration from `config_path` (when given) and the `LOG_*`
/// environment variables, which take precedence over the file.
pub fn load_config(config_path: Option<&Path>) -> Result<PickerConfig, PickerConfigError> {
    let env_overrides = EnvVarOverrides::init_from_env()?;
    let mut config = Config::builder();

    if let Some(path) = config_path {
        config = config.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    config = env_overrides.apply_overrides(config)?;

    config
        .build()?
        .try_deserialize::<PickerConfig>()?
        .validate()
}

pub fn parse_toml_config(config_raw: &str) -> Result<PickerConfig, PickerConfigError> {
    Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Toml))
        .build()?
        .try_deserialize::<PickerConfig>()?
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogFormat, LogLevel};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const BLOB: &str = r#"
[[type]]
name = "Person"
deny_list = ["foobar"]

[[type]]
name = "Stairway to Heaven"
"#;

    #[test]
    fn decodes_type_entries() {
        let config = parse_toml_config(BLOB).unwrap();

        assert_eq!(
            config.types,
            vec![
                TypeConfig {
                    name: "Person".to_string(),
                    new_name: None,
                    deny_list: vec!["foobar".to_string()],
                },
                TypeConfig {
                    name: "Stairway to Heaven".to_string(),
                    new_name: None,
                    deny_list: vec![],
                },
            ]
        );
        assert_eq!(config.log, LoggingConfig::default());
    }

    #[test]
    fn converts_to_filter_config() {
        let config = parse_toml_config(
            r#"
            [[type]]
            name = "Person"
            new_name = "SvcPerson"
            deny_list = ["address", "ssn"]

            [[type]]
            name = "Animal"
            new_name = ""
            "#,
        )
        .unwrap();

        let filter = config.filter_config();

        assert_eq!(filter.len(), 2);
        assert_eq!(
            filter.get("Person"),
            Some(&TypeFilter::deny(["address", "ssn"]).with_new_name("SvcPerson"))
        );
        assert_eq!(filter.get("Animal"), Some(&TypeFilter::default()));
    }

    #[test]
    fn decodes_log_table() {
        let config = parse_toml_config(
            r#"
            [log]
            level = "warn"
            format = "pretty-tree"
            filter = "graphql_schema_picker=debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.log.level, LogLevel::Warn);
        assert_eq!(config.log.format, LogFormat::PrettyTree);
        assert_eq!(config.log.directive(false), "graphql_schema_picker=debug");
        assert!(config.types.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        let error = parse_toml_config(
            r#"
            [[type]]
            name = "Person"
            allow_list = ["name"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(error, PickerConfigError::ConfigLoadError(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            parse_toml_config("[[type]\nname = "),
            Err(PickerConfigError::ConfigLoadError(_))
        ));
    }

    #[test]
    fn rejects_invalid_entries() {
        assert!(matches!(
            parse_toml_config("[[type]]\nname = \"\""),
            Err(PickerConfigError::MissingTypeName(0))
        ));
        assert!(matches!(
            parse_toml_config("[[type]]\nname = \"A\"\n[[type]]\nname = \"A\""),
            Err(PickerConfigError::DuplicateTypeEntry(name)) if name == "A"
        ));
        assert!(matches!(
            parse_toml_config("[[type]]\nname = \"A\"\nnew_name = \"1Bad\""),
            Err(PickerConfigError::InvalidNewName { new_name, .. }) if new_name == "1Bad"
        ));
        assert!(matches!(
            parse_toml_config("[[type]]\nname = \"A\"\nnew_name = \"with space\""),
            Err(PickerConfigError::InvalidNewName { .. })
        ));
    }

    #[test]
    fn validates_names() {
        for name in ["Person", "_private", "A1", "snake_case"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
        for name in ["", "1A", "with-dash", "Ünicode"] {
            assert!(!is_valid_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[[type]]\nname = \"Person\"\nnew_name = \"Human\"\n").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.types.len(), 1);
        assert_eq!(config.types[0].new_name.as_deref(), Some("Human"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            load_config(Some(&dir.path().join("missing.toml"))),
            Err(PickerConfigError::ConfigLoadError(_))
        ));
    }
}
