use serde::Deserialize;
use strum::{EnumString, IntoStaticStr};

/// The `[log]` table.
///
/// Every field can also be set through the environment: `LOG_LEVEL`,
/// `LOG_FORMAT` and `LOG_FILTER`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    /// An `EnvFilter` directive, e.g. `graphql_schema_picker::filter=trace`.
    /// Replaces `level` entirely when set.
    #[serde(default)]
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// The directive handed to `EnvFilter`. `--debug` wins over the file and
    /// the environment.
    pub fn directive(&self, debug: bool) -> &str {
        if debug {
            return LogLevel::Debug.as_str();
        }

        self.filter.as_deref().unwrap_or(self.level.as_str())
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// How diagnostics reach stderr. The picked SDL never goes through the logger.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Indented spans, handy with `--debug` to follow the pipeline stages.
    PrettyTree,
    #[default]
    PrettyCompact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
