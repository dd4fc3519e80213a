use graphql_schema_picker::PickError;
use graphql_schema_picker_config::PickerConfigError;

#[derive(Debug, thiserror::Error)]
pub enum PickerCliError {
    #[error("At least one definition name is required (--definitions)")]
    NoDefinitions,
    #[error("Invalid configuration: {0}")]
    PickerConfigError(#[from] PickerConfigError),
    #[error(transparent)]
    PickError(#[from] PickError),
    #[error("Failed to read SDL file '{path}': {source}")]
    SourceReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write '{path}': {source}")]
    OutputWriteError {
        path: String,
        source: std::io::Error,
    },
}
