use std::{fs, path::Path};

use graphql_schema_picker::{pick_sdl, PickOutcome, RunContext};
use graphql_schema_picker_config::load_config;
use tracing::{debug, info, warn};

use crate::{cli::PickArgs, error::PickerCliError, logger::configure_logging};

pub fn run(args: PickArgs, dry_run: bool, debug: bool) -> Result<(), PickerCliError> {
    // Checked before touching the file system.
    let desired = RunContext::new(&args.definitions, Default::default());
    if desired.desired().is_empty() {
        return Err(PickerCliError::NoDefinitions);
    }

    let config = load_config(args.config.as_deref())?;
    configure_logging(&config.log, debug);
    match args.config.as_deref() {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file given"),
    }
    debug!(
        level = config.log.level.as_str(),
        format = config.log.format.as_str(),
        filter = config.log.filter.as_deref(),
        "Logging configured"
    );

    let context = RunContext::new(desired.desired(), config.filter_config());
    debug!(
        desired = ?context.desired(),
        configured_types = context.filter().len(),
        "Starting pick"
    );

    let sdl = fs::read_to_string(&args.sdl_file).map_err(|source| {
        PickerCliError::SourceReadError {
            path: args.sdl_file.display().to_string(),
            source,
        }
    })?;

    let outcome = pick_sdl(&sdl, &context)?;
    let picked_sdl = outcome.to_sdl();
    summarize(&outcome);
    debug!("Produced SDL:\n{}", picked_sdl);

    let diagram = if debug || args.diagram.is_some() {
        let dot = outcome.pruned.to_dot();
        debug!("Dependency diagram:\n{}", dot);
        Some(dot)
    } else {
        None
    };

    if dry_run {
        info!("Dry run, skipping write of {}", args.output.display());
        return Ok(());
    }

    write_file(&args.output, &picked_sdl)?;
    info!("Wrote {}", args.output.display());

    if let (Some(path), Some(dot)) = (args.diagram.as_deref(), diagram) {
        write_file(path, &dot)?;
        info!("Wrote dependency diagram to {}", path.display());
    }

    Ok(())
}

fn summarize(outcome: &PickOutcome) {
    info!(
        "Picked {} of {} definitions",
        outcome.pruned.len(),
        outcome.source_definitions
    );

    if !outcome.diagnostics.is_empty() {
        warn!("Finished with {} diagnostic(s)", outcome.diagnostics.len());
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), PickerCliError> {
    fs::write(path, contents).map_err(|source| PickerCliError::OutputWriteError {
        path: path.display().to_string(),
        source,
    })
}
