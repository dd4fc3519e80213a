use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::{error, info, warn};

use crate::definition::DefinitionKind;

/// A recoverable finding. Diagnostics never abort a run; they are collected
/// next to the result and logged where they are discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownDesiredDefinition(String),
    UnsupportedDefinition {
        index: usize,
        kind: &'static str,
        name: Option<String>,
    },
    UnusedFilterEntry(String),
    UnknownDeniedField {
        type_name: String,
        field: String,
    },
    DenyListIgnored {
        type_name: String,
        kind: DefinitionKind,
    },
    DroppedInterface {
        type_name: String,
        interface: String,
    },
}

impl Diagnostic {
    pub fn report(&self) {
        match self {
            Diagnostic::UnknownDesiredDefinition(_) => error!("{}", self),
            Diagnostic::UnusedFilterEntry(_) => info!("{}", self),
            Diagnostic::UnsupportedDefinition { .. }
            | Diagnostic::UnknownDeniedField { .. }
            | Diagnostic::DenyListIgnored { .. }
            | Diagnostic::DroppedInterface { .. } => warn!("{}", self),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Diagnostic::UnknownDesiredDefinition(name) => {
                write!(f, "unable to find definition for: {}", name)
            }
            Diagnostic::UnsupportedDefinition { index, kind, name } => match name {
                Some(name) => write!(f, "ignoring definition {} ({} '{}')", index, kind, name),
                None => write!(f, "ignoring definition {} ({})", index, kind),
            },
            Diagnostic::UnusedFilterEntry(name) => {
                write!(f, "config entry '{}' does not match any picked definition", name)
            }
            Diagnostic::UnknownDeniedField { type_name, field } => write!(
                f,
                "deny-list of '{}' names field '{}', which does not exist",
                type_name, field
            ),
            Diagnostic::DenyListIgnored { type_name, kind } => write!(
                f,
                "deny-list of '{}' is ignored: {} definitions have no filterable fields",
                type_name, kind
            ),
            Diagnostic::DroppedInterface {
                type_name,
                interface,
            } => write!(
                f,
                "'{}' no longer implements '{}': the interface is not part of the picked schema",
                type_name, interface
            ),
        }
    }
}
