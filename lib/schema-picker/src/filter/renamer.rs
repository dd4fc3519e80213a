use std::collections::{BTreeMap, BTreeSet};

use graphql_parser::schema::{Field, InputValue, TypeDefinition};
use tracing::debug;

use crate::{
    definition::{DefinitionNode, SchemaTypeDefinition},
    diagnostics::Diagnostic,
    utils::{
        schema_transformer::{SchemaTransformer, Transformed, TransformedValue},
        type_ref::{replace_root_type_name, root_type_name, InvalidTypeReference, TypeRef},
    },
};

/// Removes denied fields from the definition being transformed, and rewrites
/// every name in it (its own, field and argument types, union members,
/// implemented interfaces) through `renames`.
pub(crate) struct FilterAndRename<'c> {
    renames: &'c BTreeMap<String, String>,
    /// Original names of every definition that survives the pick.
    retained: &'c BTreeSet<String>,
    deny_fields: Option<&'c BTreeSet<String>>,
    current: String,
    pub dropped_interfaces: Vec<Diagnostic>,
    pub error: Option<InvalidTypeReference>,
}

impl<'c> FilterAndRename<'c> {
    pub fn new(renames: &'c BTreeMap<String, String>, retained: &'c BTreeSet<String>) -> Self {
        Self {
            renames,
            retained,
            deny_fields: None,
            current: String::new(),
            dropped_interfaces: vec![],
            error: None,
        }
    }

    /// Transforms one definition. `deny_fields` applies to its fields (or input fields).
    pub fn run(
        &mut self,
        type_def: &SchemaTypeDefinition,
        deny_fields: Option<&'c BTreeSet<String>>,
    ) -> Result<Transformed<SchemaTypeDefinition>, InvalidTypeReference> {
        self.deny_fields = deny_fields;
        let transformed = self.transform_type_definition(type_def);

        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(transformed),
        }
    }

    fn is_denied(&self, field: &str) -> bool {
        self.deny_fields
            .map(|denied| denied.contains(field))
            .unwrap_or(false)
    }

    fn without_denied<I: Clone>(&self, items: &[I], name_of: impl Fn(&I) -> &str) -> Option<Vec<I>> {
        if !items.iter().any(|item| self.is_denied(name_of(item))) {
            return None;
        }

        Some(
            items
                .iter()
                .filter(|item| {
                    let name = name_of(item);
                    let denied = self.is_denied(name);
                    if denied {
                        debug!(definition = self.current.as_str(), field = name, "Removing denied field");
                    }
                    !denied
                })
                .cloned()
                .collect(),
        )
    }
}

impl SchemaTransformer<'static, String> for FilterAndRename<'_> {
    fn transform_type_definition(
        &mut self,
        type_def: &TypeDefinition<'static, String>,
    ) -> Transformed<TypeDefinition<'static, String>> {
        self.current = type_def.name().to_string();
        self.default_transform_type_definition(type_def)
    }

    fn transform_type_name(&mut self, name: &String) -> TransformedValue<String> {
        match self.renames.get(name) {
            Some(new_name) if new_name != name => TransformedValue::Replace(new_name.clone()),
            _ => TransformedValue::Keep,
        }
    }

    fn transform_type_ref(&mut self, type_ref: &TypeRef) -> TransformedValue<TypeRef> {
        let root = match root_type_name(type_ref) {
            Ok(root) => root,
            Err(error) => {
                self.error.get_or_insert(error);
                return TransformedValue::Keep;
            }
        };

        let Some(new_name) = self.renames.get(root).filter(|new_name| *new_name != root) else {
            return TransformedValue::Keep;
        };

        match replace_root_type_name(type_ref, new_name) {
            Ok(renamed) => TransformedValue::Replace(renamed),
            Err(error) => {
                self.error.get_or_insert(error);
                TransformedValue::Keep
            }
        }
    }

    fn transform_implemented_interfaces(
        &mut self,
        interfaces: &[String],
    ) -> TransformedValue<Vec<String>> {
        let retained = self.retained;
        let kept: Vec<String> = interfaces
            .iter()
            .filter(|interface| {
                let keep = retained.contains(*interface);
                if !keep {
                    let diagnostic = Diagnostic::DroppedInterface {
                        type_name: self.current.clone(),
                        interface: interface.to_string(),
                    };
                    diagnostic.report();
                    self.dropped_interfaces.push(diagnostic);
                }
                keep
            })
            .cloned()
            .collect();

        if kept.len() == interfaces.len() {
            return self.transform_list(interfaces, Self::transform_type_name);
        }

        let renamed = self.transform_list(&kept, Self::transform_type_name);
        TransformedValue::Replace(renamed.replace_or_else(|| kept))
    }

    fn transform_fields(
        &mut self,
        fields: &[Field<'static, String>],
    ) -> TransformedValue<Vec<Field<'static, String>>> {
        let Some(kept) = self.without_denied(fields, |field| field.name.as_str()) else {
            return self.default_transform_fields(fields);
        };

        let renamed = self.default_transform_fields(&kept);
        TransformedValue::Replace(renamed.replace_or_else(|| kept))
    }

    fn transform_input_fields(
        &mut self,
        fields: &[InputValue<'static, String>],
    ) -> TransformedValue<Vec<InputValue<'static, String>>> {
        let Some(kept) = self.without_denied(fields, |field| field.name.as_str()) else {
            return self.transform_input_values(fields);
        };

        let renamed = self.transform_input_values(&kept);
        TransformedValue::Replace(renamed.replace_or_else(|| kept))
    }
}
