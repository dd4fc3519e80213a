use crate::utils::type_ref::InvalidTypeReference;

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error(transparent)]
    SourceParseError(#[from] graphql_parser::schema::ParseError),
    #[error("Definition '{0}' is declared more than once")]
    DuplicateDefinition(String),
    #[error("None of the desired definitions could be resolved: {}", .0.join(", "))]
    NoResolvableDefinitions(Vec<String>),
    #[error("Malformed schema: definition '{definition}' references '{reference}', which is not defined")]
    MalformedSchema {
        definition: String,
        reference: String,
    },
    #[error("Rename collision: more than one retained definition resolves to the name '{0}'")]
    RenameCollision(String),
    #[error("Definition '{definition}' has an {source}")]
    InvalidTypeReference {
        definition: String,
        source: InvalidTypeReference,
    },
}
