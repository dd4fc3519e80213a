use graphql_parser::schema::{Definition as AstDefinition, Document};

use crate::{graph::pruned::PrunedGraph, utils::parsing::SchemaDocument};

/// Flattens `pruned` into a document, one type definition per vertex in lexical order.
pub fn assemble(pruned: &PrunedGraph) -> SchemaDocument {
    Document {
        definitions: pruned
            .definitions()
            .map(|definition| AstDefinition::TypeDefinition(definition.node().clone()))
            .collect(),
    }
}
