use std::collections::{btree_map::Entry, BTreeMap};

use graphql_parser::schema as input;
use tracing::{debug, instrument};

use crate::{
    definition::Definition, diagnostics::Diagnostic, error::PickError,
    utils::parsing::SchemaDocument,
};

/// All supported top-level definitions of a source document, keyed by name.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: BTreeMap<String, Definition>,
    /// Definitions that are not types (schema, directives, extensions), in source order.
    skipped: Vec<Diagnostic>,
}

impl DefinitionRegistry {
    #[instrument(level = "trace", skip(document), name = "register_definitions")]
    pub fn register(document: &SchemaDocument) -> Result<Self, PickError> {
        let mut instance = Self::default();

        for (index, definition) in document.definitions.iter().enumerate() {
            match definition {
                input::Definition::TypeDefinition(type_def) => {
                    let definition = Definition::new(type_def.clone());
                    debug!(
                        "Adding vertex for definition {} ({}) -- {}",
                        index,
                        definition.kind(),
                        definition.name()
                    );
                    instance.insert(definition)?;
                }
                input::Definition::SchemaDefinition(_) => {
                    instance.skip(index, "schema definition", None);
                }
                input::Definition::DirectiveDefinition(directive) => {
                    instance.skip(index, "directive definition", Some(&directive.name));
                }
                input::Definition::TypeExtension(extension) => {
                    instance.skip(index, "type extension", Some(type_extension_name(extension)));
                }
            }
        }

        Ok(instance)
    }

    fn skip(&mut self, index: usize, kind: &'static str, name: Option<&str>) {
        let diagnostic = Diagnostic::UnsupportedDefinition {
            index,
            kind,
            name: name.map(str::to_string),
        };
        diagnostic.report();
        self.skipped.push(diagnostic);
    }

    fn insert(&mut self, definition: Definition) -> Result<(), PickError> {
        match self.definitions.entry(definition.name().to_string()) {
            Entry::Occupied(entry) => Err(PickError::DuplicateDefinition(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(definition);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Definitions in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn skipped(&self) -> &[Diagnostic] {
        &self.skipped
    }
}

fn type_extension_name<'a>(extension: &'a input::TypeExtension<'static, String>) -> &'a str {
    match extension {
        input::TypeExtension::Scalar(ext) => &ext.name,
        input::TypeExtension::Object(ext) => &ext.name,
        input::TypeExtension::Interface(ext) => &ext.name,
        input::TypeExtension::Union(ext) => &ext.name,
        input::TypeExtension::Enum(ext) => &ext.name,
        input::TypeExtension::InputObject(ext) => &ext.name,
    }
}
