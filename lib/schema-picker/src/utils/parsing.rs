use graphql_parser::schema::{Document, ParseError};

pub type SchemaDocument = Document<'static, String>;

#[inline]
pub fn parse_schema(sdl: &str) -> Result<SchemaDocument, ParseError> {
    graphql_parser::parse_schema::<String>(sdl).map(|document| document.into_static())
}
