use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter, Result as FmtResult},
};

use petgraph::{dot::Dot, graph::NodeIndex, Directed, Graph as Petgraph};

use crate::{definition::Definition, graph::edges::EdgeKind};

/// The definitions reachable from the desired roots, and the edges between them.
///
/// Produced by the closure and rewritten (as a new value) by the filter. Both maps
/// are keyed by the current, possibly renamed, definition names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrunedGraph {
    definitions: BTreeMap<String, Definition>,
    edges: BTreeMap<(String, String), EdgeKind>,
    discovery_order: Vec<String>,
}

impl PrunedGraph {
    pub(crate) fn insert_definition(&mut self, definition: Definition) {
        let name = definition.name().to_string();

        if self.definitions.insert(name.clone(), definition).is_none() {
            self.discovery_order.push(name);
        }
    }

    pub(crate) fn insert_edge(&mut self, from: &str, to: &str, kind: EdgeKind) {
        self.edges
            .entry((from.to_string(), to.to_string()))
            .or_insert(kind);
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Definitions in lexical name order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// `(from, to, kind)` in lexical order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, EdgeKind)> {
        self.edges
            .iter()
            .map(|((from, to), kind)| (from.as_str(), to.as_str(), *kind))
    }

    /// Names in the order the closure first reached them. Only meaningful for logs.
    pub fn discovery_order(&self) -> &[String] {
        &self.discovery_order
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn into_definitions(self) -> impl Iterator<Item = Definition> {
        self.definitions.into_values()
    }

    /// Graphviz DOT rendering of the vertices and edges, labelled by edge kind.
    pub fn to_dot(&self) -> String {
        let mut graph: Petgraph<&str, EdgeKind, Directed> = Petgraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        for name in self.names() {
            indices.insert(name, graph.add_node(name));
        }

        for (from, to, kind) in self.edges() {
            if let (Some(head), Some(tail)) = (indices.get(from), indices.get(to)) {
                graph.add_edge(*head, *tail, kind);
            }
        }

        format!("{}", Dot::with_config(&graph, &[]))
    }
}

impl Display for PrunedGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for definition in self.definitions() {
            let dependencies: Vec<&str> = self
                .edges()
                .filter(|(from, _, _)| *from == definition.name())
                .map(|(_, to, _)| to)
                .collect();

            if dependencies.is_empty() {
                writeln!(f, "{} ({})", definition.name(), definition.kind())?;
            } else {
                writeln!(
                    f,
                    "{} ({}) -> {}",
                    definition.name(),
                    definition.kind(),
                    dependencies.join(", ")
                )?;
            }
        }

        Ok(())
    }
}
