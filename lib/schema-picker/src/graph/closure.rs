use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, instrument};

use crate::{
    diagnostics::Diagnostic,
    error::PickError,
    graph::{pruned::PrunedGraph, DependencyGraph},
};

/// Breadth-first transitive closure of `desired` over `graph`.
///
/// Unknown desired names are reported and skipped. Every definition reachable
/// through any chain of dependencies ends up in the result; cycles are walked once.
#[instrument(level = "trace", skip(graph, desired), name = "closure")]
pub fn closure(
    graph: &DependencyGraph,
    desired: &[String],
) -> Result<(PrunedGraph, Vec<Diagnostic>), PickError> {
    let mut diagnostics = Vec::new();
    let mut requested: Vec<&str> = Vec::with_capacity(desired.len());
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for name in desired.iter().map(String::as_str) {
        if requested.contains(&name) {
            continue;
        }
        requested.push(name);

        if graph.contains(name) {
            visited.insert(name);
            queue.push_back(name);
        } else {
            let diagnostic = Diagnostic::UnknownDesiredDefinition(name.to_string());
            diagnostic.report();
            diagnostics.push(diagnostic);
        }
    }

    if queue.is_empty() {
        return Err(PickError::NoResolvableDefinitions(
            requested.into_iter().map(str::to_string).collect(),
        ));
    }

    let roots = queue.len();
    let mut pruned = PrunedGraph::default();

    while let Some(name) = queue.pop_front() {
        let Some(definition) = graph.definition(name) else {
            continue;
        };
        pruned.insert_definition(definition.clone());

        for (target, kind) in graph.dependencies(name) {
            pruned.insert_edge(name, target, kind);

            if visited.insert(target) {
                debug!(from = name, to = target, "Discovered definition");
                queue.push_back(target);
            }
        }
    }

    info!(
        "Closure of {} root(s) holds {} of {} definitions",
        roots,
        pruned.len(),
        graph.node_count()
    );

    Ok((pruned, diagnostics))
}
