mod renamer;

use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

use tracing::{debug, info, instrument};

use crate::{
    definition::Definition,
    diagnostics::Diagnostic,
    error::PickError,
    filter::renamer::FilterAndRename,
    graph::{edges::edges_for, pruned::PrunedGraph},
    utils::{schema_transformer::Transformed, type_ref::is_builtin_scalar},
};

/// What to do with a single definition, by its original name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    pub new_name: Option<String>,
    pub deny_fields: BTreeSet<String>,
}

impl TypeFilter {
    pub fn rename(new_name: impl Into<String>) -> Self {
        Self {
            new_name: Some(new_name.into()),
            ..Default::default()
        }
    }

    pub fn deny<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            deny_fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    types: BTreeMap<String, TypeFilter>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous entry for `name`.
    pub fn insert(&mut self, name: impl Into<String>, filter: TypeFilter) {
        self.types.insert(name.into(), filter);
    }

    pub fn with(mut self, name: impl Into<String>, filter: TypeFilter) -> Self {
        self.insert(name, filter);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeFilter> {
        self.types.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeFilter)> {
        self.types.iter().map(|(name, filter)| (name.as_str(), filter))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

impl<S: Into<String>> FromIterator<(S, TypeFilter)> for FilterConfig {
    fn from_iter<I: IntoIterator<Item = (S, TypeFilter)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(name, filter)| (name.into(), filter))
                .collect(),
        }
    }
}

/// Applies deny-lists and renames to a closed pruned graph.
///
/// The vertex set is left untouched: a definition that was only reachable through
/// a denied field stays in the result. Every reference to a renamed definition is
/// rewritten, so the result is consistent under the new names.
#[instrument(level = "trace", skip(pruned, config), name = "apply_filters")]
pub fn apply(
    pruned: &PrunedGraph,
    config: &FilterConfig,
) -> Result<(PrunedGraph, Vec<Diagnostic>), PickError> {
    let mut diagnostics = check_entries(pruned, config);
    let renames = final_names(pruned, config)?;
    let retained: BTreeSet<String> = pruned.names().map(str::to_string).collect();
    let mut transformer = FilterAndRename::new(&renames, &retained);
    let mut filtered = PrunedGraph::default();

    for name in pruned.discovery_order() {
        let Some(definition) = pruned.get(name) else {
            continue;
        };
        let deny_fields = config
            .get(name)
            .filter(|_| definition.kind().has_filterable_fields())
            .map(|filter| &filter.deny_fields)
            .filter(|denied| !denied.is_empty());

        let next = match transformer.run(definition.node(), deny_fields) {
            Ok(Transformed::Keep) => definition.clone(),
            Ok(Transformed::Replace(node)) => Definition::from_sanitized(node),
            Err(source) => {
                return Err(PickError::InvalidTypeReference {
                    definition: name.clone(),
                    source,
                })
            }
        };

        if next.name() != name {
            info!(from = name.as_str(), to = next.name(), "Renamed definition");
        }

        filtered.insert_definition(next);
    }

    // Edges are recomputed from the filtered definitions so they reflect the output.
    let mut edges = vec![];
    for definition in filtered.definitions() {
        for (target, kind) in edges_for(definition)? {
            edges.push((definition.name().to_string(), target, kind));
        }
    }
    for (from, to, kind) in edges {
        filtered.insert_edge(&from, &to, kind);
    }

    diagnostics.append(&mut transformer.dropped_interfaces);

    debug!(
        "Filtered graph has {} definitions and {} edges",
        filtered.len(),
        filtered.edge_count()
    );

    Ok((filtered, diagnostics))
}

fn check_entries(pruned: &PrunedGraph, config: &FilterConfig) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];

    for (name, filter) in config.iter() {
        let Some(definition) = pruned.get(name) else {
            diagnostics.push(Diagnostic::UnusedFilterEntry(name.to_string()));
            continue;
        };

        if filter.deny_fields.is_empty() {
            continue;
        }

        if !definition.kind().has_filterable_fields() {
            diagnostics.push(Diagnostic::DenyListIgnored {
                type_name: name.to_string(),
                kind: definition.kind(),
            });
            continue;
        }

        let fields = definition.field_names();
        for field in filter.deny_fields.iter() {
            if !fields.contains(&field.as_str()) {
                diagnostics.push(Diagnostic::UnknownDeniedField {
                    type_name: name.to_string(),
                    field: field.clone(),
                });
            }
        }
    }

    for diagnostic in diagnostics.iter() {
        diagnostic.report();
    }

    diagnostics
}

/// Original name -> final name, for every retained definition with a rename.
/// Fails when two retained definitions end up under the same name, or when a
/// definition would take the name of a built-in scalar.
fn final_names(
    pruned: &PrunedGraph,
    config: &FilterConfig,
) -> Result<BTreeMap<String, String>, PickError> {
    let mut renames = BTreeMap::new();
    let mut taken: BTreeMap<&str, &str> = BTreeMap::new();

    for name in pruned.names() {
        let final_name = config
            .get(name)
            .and_then(|filter| filter.new_name.as_deref())
            .unwrap_or(name);

        if is_builtin_scalar(final_name) {
            return Err(PickError::RenameCollision(final_name.to_string()));
        }

        match taken.entry(final_name) {
            Entry::Occupied(entry) => {
                debug!(
                    first = *entry.get(),
                    second = name,
                    name = final_name,
                    "Two definitions share a final name"
                );
                return Err(PickError::RenameCollision(final_name.to_string()));
            }
            Entry::Vacant(entry) => {
                entry.insert(name);
            }
        }

        if final_name != name {
            renames.insert(name.to_string(), final_name.to_string());
        }
    }

    Ok(renames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        definition::DefinitionKind,
        graph::{closure::closure, edges::EdgeKind, DependencyGraph},
        registry::DefinitionRegistry,
        utils::parsing::parse_schema,
    };
    use graphql_parser::schema::TypeDefinition;
    use pretty_assertions::assert_eq;

    fn closed(sdl: &str, desired: &[&str]) -> PrunedGraph {
        let document = parse_schema(sdl).unwrap();
        let graph = DependencyGraph::build(DefinitionRegistry::register(&document).unwrap()).unwrap();
        let desired: Vec<String> = desired.iter().map(|s| s.to_string()).collect();

        closure(&graph, &desired).unwrap().0
    }

    fn field_types(pruned: &PrunedGraph, name: &str) -> Vec<String> {
        match pruned.get(name).unwrap().node() {
            TypeDefinition::Object(object) => object
                .fields
                .iter()
                .map(|field| format!("{}: {}", field.name, field.field_type))
                .collect(),
            TypeDefinition::InputObject(input) => input
                .fields
                .iter()
                .map(|field| format!("{}: {}", field.name, field.value_type))
                .collect(),
            other => panic!("unexpected definition {:?}", other),
        }
    }

    const PEOPLE: &str = r#"
        type Person {
            name: String
            address: String
            pet: Animal
        }
        type Animal { species: String }
        type Owner { person: Person, people(filter: PersonFilter): [Person!]! }
        input PersonFilter { name: String, address: String, like: PersonFilter }
        union Anyone = Person | Owner
    "#;

    #[test]
    fn empty_config_keeps_everything() {
        let pruned = closed(PEOPLE, &["Owner"]);

        let (filtered, diagnostics) = apply(&pruned, &FilterConfig::new()).unwrap();

        assert_eq!(filtered, pruned);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn removes_denied_fields_from_objects_and_inputs() {
        let pruned = closed(PEOPLE, &["Owner"]);
        let config = FilterConfig::new()
            .with("Person", TypeFilter::deny(["address"]))
            .with("PersonFilter", TypeFilter::deny(["address", "like"]));

        let (filtered, diagnostics) = apply(&pruned, &config).unwrap();

        assert_eq!(field_types(&filtered, "Person"), vec!["name: String", "pet: Animal"]);
        assert_eq!(field_types(&filtered, "PersonFilter"), vec!["name: String"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn denied_dependency_stays_in_the_vertex_set() {
        let pruned = closed(PEOPLE, &["Person"]);
        let config = FilterConfig::new().with("Person", TypeFilter::deny(["pet"]));

        let (filtered, _) = apply(&pruned, &config).unwrap();

        assert_eq!(filtered.names().collect::<Vec<_>>(), vec!["Animal", "Person"]);
        assert_eq!(field_types(&filtered, "Person"), vec!["name: String", "address: String"]);
        // The edge went away together with the field.
        assert_eq!(filtered.edge_count(), 0);
    }

    #[test]
    fn rename_rewrites_every_reference() {
        let pruned = closed(PEOPLE, &["Owner", "Anyone"]);
        let config = FilterConfig::new().with("Person", TypeFilter::rename("Human"));

        let (filtered, _) = apply(&pruned, &config).unwrap();

        assert!(!filtered.contains("Person"));
        assert_eq!(filtered.get("Human").unwrap().kind(), DefinitionKind::Object);
        assert_eq!(
            field_types(&filtered, "Owner"),
            vec!["person: Human", "people: [Human!]!"]
        );

        let TypeDefinition::Union(union) = filtered.get("Anyone").unwrap().node() else {
            panic!("expected a union");
        };
        assert_eq!(union.types, vec!["Human".to_string(), "Owner".to_string()]);

        assert_eq!(
            filtered.edges().collect::<Vec<_>>(),
            vec![
                ("Anyone", "Human", EdgeKind::UnionMember),
                ("Anyone", "Owner", EdgeKind::UnionMember),
                ("Human", "Animal", EdgeKind::Field),
                ("Owner", "Human", EdgeKind::Field),
                ("Owner", "PersonFilter", EdgeKind::Argument),
                ("PersonFilter", "PersonFilter", EdgeKind::Field),
            ]
        );
    }

    #[test]
    fn rename_reaches_argument_and_input_field_types() {
        let pruned = closed(PEOPLE, &["Owner"]);
        let config = FilterConfig::new().with("PersonFilter", TypeFilter::rename("HumanFilter"));

        let (filtered, _) = apply(&pruned, &config).unwrap();

        let TypeDefinition::Object(owner) = filtered.get("Owner").unwrap().node() else {
            panic!("expected an object");
        };
        assert_eq!(owner.fields[1].arguments[0].value_type.to_string(), "HumanFilter");
        assert_eq!(
            field_types(&filtered, "HumanFilter"),
            vec!["name: String", "address: String", "like: HumanFilter"]
        );
    }

    #[test]
    fn rename_and_deny_on_the_same_type() {
        let pruned = closed(PEOPLE, &["Person"]);
        let config = FilterConfig::new().with(
            "Person",
            TypeFilter::deny(["address"]).with_new_name("Human"),
        );

        let (filtered, _) = apply(&pruned, &config).unwrap();

        assert_eq!(field_types(&filtered, "Human"), vec!["name: String", "pet: Animal"]);
        assert_eq!(filtered.discovery_order(), &["Human", "Animal"]);
    }

    #[test]
    fn rename_collisions_are_fatal() {
        let pruned = closed(PEOPLE, &["Owner"]);

        let config = FilterConfig::new().with("Person", TypeFilter::rename("Animal"));
        assert!(matches!(
            apply(&pruned, &config),
            Err(PickError::RenameCollision(name)) if name == "Animal"
        ));

        let config = FilterConfig::new()
            .with("Person", TypeFilter::rename("Being"))
            .with("Animal", TypeFilter::rename("Being"));
        assert!(matches!(
            apply(&pruned, &config),
            Err(PickError::RenameCollision(name)) if name == "Being"
        ));

        let config = FilterConfig::new().with("Person", TypeFilter::rename("String"));
        assert!(matches!(
            apply(&pruned, &config),
            Err(PickError::RenameCollision(name)) if name == "String"
        ));
    }

    #[test]
    fn swapping_names_is_not_a_collision() {
        let pruned = closed(PEOPLE, &["Person"]);
        let config = FilterConfig::new()
            .with("Person", TypeFilter::rename("Animal"))
            .with("Animal", TypeFilter::rename("Person"));

        let (filtered, _) = apply(&pruned, &config).unwrap();

        assert_eq!(
            field_types(&filtered, "Animal"),
            vec!["name: String", "address: String", "pet: Person"]
        );
        assert_eq!(field_types(&filtered, "Person"), vec!["species: String"]);
    }

    #[test]
    fn reports_config_findings() {
        let pruned = closed(
            r#"
            type Person { name: String, kind: Kind }
            enum Kind { A B }
            "#,
            &["Person"],
        );
        let config = FilterConfig::new()
            .with("Ghost", TypeFilter::rename("Phantom"))
            .with("Kind", TypeFilter::deny(["A"]))
            .with("Person", TypeFilter::deny(["name", "age"]));

        let (filtered, diagnostics) = apply(&pruned, &config).unwrap();

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnusedFilterEntry("Ghost".to_string()),
                Diagnostic::DenyListIgnored {
                    type_name: "Kind".to_string(),
                    kind: DefinitionKind::Enum,
                },
                Diagnostic::UnknownDeniedField {
                    type_name: "Person".to_string(),
                    field: "age".to_string(),
                },
            ]
        );
        assert_eq!(field_types(&filtered, "Person"), vec!["kind: Kind"]);
        assert_eq!(filtered.get("Kind").unwrap().field_names(), vec!["A", "B"]);
    }

    #[test]
    fn drops_interfaces_outside_the_picked_set() {
        let pruned = closed(
            r#"
            interface Node { id: ID! }
            interface Named { name: String }
            type Cat implements Node & Named { id: ID!, name: String }
            type Box { cat: Cat, named: Named }
            "#,
            &["Box"],
        );
        let config = FilterConfig::new().with("Named", TypeFilter::rename("HasName"));

        let (filtered, diagnostics) = apply(&pruned, &config).unwrap();

        let TypeDefinition::Object(cat) = filtered.get("Cat").unwrap().node() else {
            panic!("expected an object");
        };
        assert_eq!(cat.implements_interfaces, vec!["HasName".to_string()]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DroppedInterface {
                type_name: "Cat".to_string(),
                interface: "Node".to_string(),
            }]
        );
    }
}
