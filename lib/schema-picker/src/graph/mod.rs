pub mod closure;
pub mod edges;
pub mod pruned;


use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter, Result as FmtResult},
};

use petgraph::{
    dot::Dot,
    graph::{EdgeIndex, NodeIndex},
    visit::EdgeRef,
    Directed, Direction, Graph as Petgraph,
};
use tracing::{debug, instrument};

use crate::{
    definition::Definition,
    error::PickError,
    graph::edges::{edges_for, EdgeKind},
    registry::DefinitionRegistry,
};

type InnerGraph = Petgraph<String, EdgeKind, Directed>;

/// Dependency graph over every registered definition of the source document.
///
/// Built once per run and never mutated afterwards. Every edge points at a
/// registered definition; a reference to anything else fails the build.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    registry: DefinitionRegistry,
    graph: InnerGraph,
    node_name_to_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    #[instrument(level = "trace", skip(registry), name = "build_dependency_graph")]
    pub fn build(registry: DefinitionRegistry) -> Result<Self, PickError> {
        let mut instance = DependencyGraph {
            registry,
            ..Default::default()
        };

        let names: Vec<String> = instance
            .registry
            .iter()
            .map(|definition| definition.name().to_string())
            .collect();

        for name in names.iter() {
            instance.upsert_node(name);
        }

        for name in names.iter() {
            let Some(definition) = instance.registry.get(name) else {
                continue;
            };
            let dependencies = edges_for(definition)?;
            instance.link(name, dependencies)?;
        }

        debug!(
            "Dependency graph has {} vertices and {} edges",
            instance.node_count(),
            instance.edge_count()
        );

        Ok(instance)
    }

    fn link(
        &mut self,
        from: &str,
        dependencies: BTreeMap<String, EdgeKind>,
    ) -> Result<(), PickError> {
        let head = self.upsert_node(from);

        for (target, kind) in dependencies {
            if !self.registry.contains(&target) {
                return Err(PickError::MalformedSchema {
                    definition: from.to_string(),
                    reference: target,
                });
            }

            debug!(
                definition = from,
                dependency = target.as_str(),
                kind = %kind,
                "Found dependency"
            );
            let tail = self.upsert_node(&target);
            self.upsert_edge(head, tail, kind);
        }

        Ok(())
    }

    fn upsert_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.node_name_to_index.get(name) {
            return *index;
        }

        let index = self.graph.add_node(name.to_string());
        self.node_name_to_index.insert(name.to_string(), index);

        index
    }

    /// At most one edge per (head, tail) pair.
    fn upsert_edge(&mut self, head: NodeIndex, tail: NodeIndex, kind: EdgeKind) -> EdgeIndex {
        match self.graph.find_edge(head, tail) {
            Some(edge) => edge,
            None => self.graph.add_edge(head, tail, kind),
        }
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.registry.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_name_to_index.contains_key(name)
    }

    /// Outgoing dependencies of `name`, sorted by target name.
    pub fn dependencies(&self, name: &str) -> Vec<(&str, EdgeKind)> {
        let Some(index) = self.node_name_to_index.get(name) else {
            return vec![];
        };

        let mut dependencies: Vec<(&str, EdgeKind)> = self
            .graph
            .edges_directed(*index, Direction::Outgoing)
            .map(|edge| (self.graph[edge.target()].as_str(), *edge.weight()))
            .collect();
        dependencies.sort_unstable();

        dependencies
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Display for DependencyGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", Dot::with_config(&self.graph, &[]))
    }
}
