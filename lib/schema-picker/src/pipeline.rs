use tracing::{debug, info, instrument};

use crate::{
    assembler::assemble,
    diagnostics::Diagnostic,
    error::PickError,
    filter::{self, FilterConfig},
    graph::{closure::closure, pruned::PrunedGraph, DependencyGraph},
    registry::DefinitionRegistry,
    utils::parsing::{parse_schema, SchemaDocument},
};

/// Everything a single pick depends on besides the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    desired: Vec<String>,
    filter: FilterConfig,
}

impl RunContext {
    /// Desired names are trimmed; blank entries are dropped and repeated ones
    /// collapse onto their first occurrence.
    pub fn new<I, S>(desired: I, filter: FilterConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = vec![];

        for name in desired {
            let name = name.as_ref().trim();

            if !name.is_empty() && !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }

        Self {
            desired: names,
            filter,
        }
    }

    pub fn desired(&self) -> &[String] {
        &self.desired
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }
}

#[derive(Debug)]
pub struct PickOutcome {
    pub document: SchemaDocument,
    /// The filtered graph the document was assembled from.
    pub pruned: PrunedGraph,
    /// Recoverable findings, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    pub source_definitions: usize,
}

impl PickOutcome {
    pub fn to_sdl(&self) -> String {
        self.document.to_string()
    }
}

/// Parses `sdl` and picks from it.
pub fn pick_sdl(sdl: &str, context: &RunContext) -> Result<PickOutcome, PickError> {
    let document = parse_schema(sdl)?;
    info!("Parsed document with {} definitions", document.definitions.len());

    pick(&document, context)
}

#[instrument(level = "trace", skip_all, fields(desired = ?context.desired()))]
pub fn pick(document: &SchemaDocument, context: &RunContext) -> Result<PickOutcome, PickError> {
    let registry = DefinitionRegistry::register(document)?;
    let mut diagnostics = registry.skipped().to_vec();

    let graph = DependencyGraph::build(registry)?;
    let (closed, unknown) = closure(&graph, context.desired())?;
    diagnostics.extend(unknown);

    let (pruned, findings) = filter::apply(&closed, context.filter())?;
    diagnostics.extend(findings);

    let picked = assemble(&pruned);
    info!(
        "new doc has {} defs, old one has {}",
        picked.definitions.len(),
        document.definitions.len()
    );
    debug!(discovery_order = ?pruned.discovery_order(), "Picked definitions");

    Ok(PickOutcome {
        document: picked,
        pruned,
        diagnostics,
        source_definitions: document.definitions.len(),
    })
}
