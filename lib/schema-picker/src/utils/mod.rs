pub mod parsing;
pub mod schema_transformer;
pub mod type_ref;
