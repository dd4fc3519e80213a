use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use graphql_parser::schema::{Field, InputValue, TypeDefinition};
use tracing::debug;

use crate::{
    definition::Definition,
    error::PickError,
    utils::type_ref::{is_builtin_scalar, root_type_name, TypeRef},
};

/// Where a dependency was found. When the same pair is linked more than once,
/// the first source in declaration order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    Field,
    Argument,
    UnionMember,
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EdgeKind::Field => write!(f, "field"),
            EdgeKind::Argument => write!(f, "argument"),
            EdgeKind::UnionMember => write!(f, "member"),
        }
    }
}

/// Target definition name -> how it is referenced.
pub type DependencySet = BTreeMap<String, EdgeKind>;

/// Names of the non built-in definitions `definition` depends on.
///
/// | Kind                | Dependency sources                       |
/// |---------------------|------------------------------------------|
/// | Object, Interface   | field types, field argument types        |
/// | InputObject         | field types                              |
/// | Union               | member types                             |
/// | Enum, Scalar        | none                                     |
pub fn edges_for(definition: &Definition) -> Result<DependencySet, PickError> {
    let mut edges = DependencySet::new();
    let owner = definition.name();

    match definition.node() {
        TypeDefinition::Object(object) => collect_field_edges(owner, &object.fields, &mut edges)?,
        TypeDefinition::Interface(interface) => {
            collect_field_edges(owner, &interface.fields, &mut edges)?
        }
        TypeDefinition::InputObject(input) => {
            collect_input_value_edges(owner, &input.fields, EdgeKind::Field, &mut edges)?
        }
        TypeDefinition::Union(union) => {
            for member in union.types.iter() {
                insert_edge(&mut edges, member, EdgeKind::UnionMember);
            }
        }
        TypeDefinition::Enum(_) | TypeDefinition::Scalar(_) => {}
    }

    Ok(edges)
}

fn collect_field_edges(
    owner: &str,
    fields: &[Field<'static, String>],
    edges: &mut DependencySet,
) -> Result<(), PickError> {
    for field in fields {
        let root_type = resolve(owner, &field.field_type)?;

        if !is_builtin_scalar(root_type) {
            debug!(
                object = owner,
                name = field.name.as_str(),
                r#type = root_type,
                "Found field in object"
            );
        }

        insert_edge(edges, root_type, EdgeKind::Field);
        // Arguments are dependencies of the owning definition too.
        collect_input_value_edges(owner, &field.arguments, EdgeKind::Argument, edges)?;
    }

    Ok(())
}

fn collect_input_value_edges(
    owner: &str,
    values: &[InputValue<'static, String>],
    kind: EdgeKind,
    edges: &mut DependencySet,
) -> Result<(), PickError> {
    for value in values {
        let root_type = resolve(owner, &value.value_type)?;
        insert_edge(edges, root_type, kind);
    }

    Ok(())
}

fn resolve<'t>(owner: &str, type_ref: &'t TypeRef) -> Result<&'t str, PickError> {
    root_type_name(type_ref).map_err(|source| PickError::InvalidTypeReference {
        definition: owner.to_string(),
        source,
    })
}

fn insert_edge(edges: &mut DependencySet, target: &str, kind: EdgeKind) {
    if is_builtin_scalar(target) {
        return;
    }

    edges.entry(target.to_string()).or_insert(kind);
}
