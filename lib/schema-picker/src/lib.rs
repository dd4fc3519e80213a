pub mod assembler;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod graph;
pub mod pipeline;
pub mod registry;
pub mod utils;


pub use diagnostics::Diagnostic;
pub use error::PickError;
pub use filter::{FilterConfig, TypeFilter};
pub use pipeline::{pick, pick_sdl, PickOutcome, RunContext};
pub use utils::parsing::{parse_schema, SchemaDocument};
