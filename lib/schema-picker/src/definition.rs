use std::fmt::{Display, Formatter, Result as FmtResult};

use graphql_parser::schema::{
    EnumType, Field, InputObjectType, InputValue, InterfaceType, ObjectType, ScalarType,
    TypeDefinition, UnionType,
};

pub type SchemaTypeDefinition = TypeDefinition<'static, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl DefinitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::Scalar => "scalar",
            DefinitionKind::Object => "object",
            DefinitionKind::Interface => "interface",
            DefinitionKind::Union => "union",
            DefinitionKind::Enum => "enum",
            DefinitionKind::InputObject => "input object",
        }
    }

    /// Kinds whose fields can be removed through a deny-list.
    pub fn has_filterable_fields(&self) -> bool {
        matches!(self, DefinitionKind::Object | DefinitionKind::InputObject)
    }
}

impl Display for DefinitionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Per-kind view over a type definition.
pub trait DefinitionNode {
    fn name(&self) -> &str;
    fn kind(&self) -> DefinitionKind;
    fn description(&self) -> Option<&str>;
    /// Names of the fields (or enum values) declared by this definition, in source order.
    fn field_names(&self) -> Vec<&str>;
}

macro_rules! impl_definition_node {
    ($ty:ident, $kind:expr, |$node:ident| $fields:expr) => {
        impl DefinitionNode for $ty<'static, String> {
            fn name(&self) -> &str {
                &self.name
            }

            fn kind(&self) -> DefinitionKind {
                $kind
            }

            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }

            fn field_names(&self) -> Vec<&str> {
                let $node = self;
                $fields
            }
        }
    };
}

impl_definition_node!(ScalarType, DefinitionKind::Scalar, |_scalar| vec![]);
impl_definition_node!(ObjectType, DefinitionKind::Object, |object| object
    .fields
    .iter()
    .map(|f| f.name.as_str())
    .collect());
impl_definition_node!(InterfaceType, DefinitionKind::Interface, |interface| interface
    .fields
    .iter()
    .map(|f| f.name.as_str())
    .collect());
impl_definition_node!(UnionType, DefinitionKind::Union, |_union| vec![]);
impl_definition_node!(EnumType, DefinitionKind::Enum, |enum_type| enum_type
    .values
    .iter()
    .map(|v| v.name.as_str())
    .collect());
impl_definition_node!(InputObjectType, DefinitionKind::InputObject, |input| input
    .fields
    .iter()
    .map(|f| f.name.as_str())
    .collect());

impl DefinitionNode for SchemaTypeDefinition {
    fn name(&self) -> &str {
        self.as_node().name()
    }

    fn kind(&self) -> DefinitionKind {
        self.as_node().kind()
    }

    fn description(&self) -> Option<&str> {
        self.as_node().description()
    }

    fn field_names(&self) -> Vec<&str> {
        self.as_node().field_names()
    }
}

trait AsDefinitionNode {
    fn as_node(&self) -> &dyn DefinitionNode;
}

impl AsDefinitionNode for SchemaTypeDefinition {
    fn as_node(&self) -> &dyn DefinitionNode {
        match self {
            TypeDefinition::Scalar(scalar) => scalar,
            TypeDefinition::Object(object) => object,
            TypeDefinition::Interface(interface) => interface,
            TypeDefinition::Union(union) => union,
            TypeDefinition::Enum(enum_type) => enum_type,
            TypeDefinition::InputObject(input) => input,
        }
    }
}

/// A named top-level type definition, as registered from the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    node: SchemaTypeDefinition,
}

impl Definition {
    /// Wraps a parsed type definition, sanitizing every description it carries.
    pub fn new(mut node: SchemaTypeDefinition) -> Self {
        sanitize_descriptions(&mut node);
        Self { node }
    }

    /// Wraps a definition that was derived from an already sanitized one.
    pub(crate) fn from_sanitized(node: SchemaTypeDefinition) -> Self {
        Self { node }
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn kind(&self) -> DefinitionKind {
        self.node.kind()
    }

    pub fn description(&self) -> Option<&str> {
        self.node.description()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.node.field_names()
    }

    pub fn node(&self) -> &SchemaTypeDefinition {
        &self.node
    }

    pub fn into_node(self) -> SchemaTypeDefinition {
        self.node
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

/// Normalizes typographic quotes and line endings so the text is re-emitted verbatim.
pub fn sanitize_description(description: &str) -> String {
    description
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(
            |c: char| matches!(c, '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}'),
            "\"",
        )
        .replace(
            |c: char| matches!(c, '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}'),
            "'",
        )
}

fn sanitize(description: &mut Option<String>) {
    if let Some(text) = description.as_mut() {
        *text = sanitize_description(text);
    }
}

fn sanitize_fields(fields: &mut [Field<'static, String>]) {
    for field in fields {
        sanitize(&mut field.description);
        sanitize_input_values(&mut field.arguments);
    }
}

fn sanitize_input_values(values: &mut [InputValue<'static, String>]) {
    for value in values {
        sanitize(&mut value.description);
    }
}

fn sanitize_descriptions(node: &mut SchemaTypeDefinition) {
    match node {
        TypeDefinition::Scalar(scalar) => sanitize(&mut scalar.description),
        TypeDefinition::Object(object) => {
            sanitize(&mut object.description);
            sanitize_fields(&mut object.fields);
        }
        TypeDefinition::Interface(interface) => {
            sanitize(&mut interface.description);
            sanitize_fields(&mut interface.fields);
        }
        TypeDefinition::Union(union) => sanitize(&mut union.description),
        TypeDefinition::Enum(enum_type) => {
            sanitize(&mut enum_type.description);
            for value in enum_type.values.iter_mut() {
                sanitize(&mut value.description);
            }
        }
        TypeDefinition::InputObject(input) => {
            sanitize(&mut input.description);
            sanitize_input_values(&mut input.fields);
        }
    }
}
