use graphql_schema_picker_config::log::{LogFormat, LoggingConfig};
use tracing_subscriber::{
    fmt::{self, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber writing to stderr. Does nothing when one is
/// already installed.
pub fn configure_logging(config: &LoggingConfig, debug: bool) {
    let filter = EnvFilter::new(config.directive(debug));

    let _ = tracing_subscriber::registry()
        .with(output_layer(config.format))
        .with(filter)
        .try_init();
}

fn output_layer(format: LogFormat) -> BoxedLayer {
    match format {
        // tracing-tree writes to stderr on its own.
        LogFormat::PrettyTree => tracing_tree::HierarchicalLayer::new(2)
            .with_bracketed_fields(true)
            .with_indent_lines(true)
            .with_targets(false)
            .boxed(),
        LogFormat::Json => fmt::Layer::<Registry>::default()
            .with_writer(std::io::stderr)
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_current_span(false)
            .boxed(),
        // A one-shot command has no use for timestamps.
        LogFormat::PrettyCompact => fmt::Layer::<Registry>::default()
            .with_writer(std::io::stderr)
            .compact()
            .without_time()
            .with_target(false)
            .boxed(),
    }
}
