//! Console and file sinks as `tracing-subscriber` fmt layers.
//!
//! Both layers sit on one registry. Each one only sees events emitted under
//! its own target, so the facade decides per sink whether a record is written.

use corrlog_config::SinkConfig;
use tracing::Dispatch;
use tracing_subscriber::fmt::{self, time::ChronoUtc, writer::BoxMakeWriter};
use tracing_subscriber::{filter, layer::SubscriberExt, Layer, Registry};

/// Event target routed to the console sink.
pub const CONSOLE_TARGET: &str = "corrlog::console";
/// Event target routed to the file sink.
pub const FILE_TARGET: &str = "corrlog::file";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

type SinkLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn timer() -> ChronoUtc {
    ChronoUtc::new(TIMESTAMP_FORMAT.to_string())
}

/// Build one sink layer that only accepts events under `target`.
fn sink_layer(config: &SinkConfig, target: &'static str, writer: BoxMakeWriter) -> SinkLayer {
    let routed = filter::filter_fn(move |meta| meta.target() == target);
    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(config.colorized)
        .with_target(false);

    match (config.json_format, config.timestamped) {
        (true, true) => base
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_timer(timer())
            .with_filter(routed)
            .boxed(),
        (true, false) => base
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .without_time()
            .with_filter(routed)
            .boxed(),
        (false, true) => base.with_timer(timer()).with_filter(routed).boxed(),
        (false, false) => base.without_time().with_filter(routed).boxed(),
    }
}

/// Assemble the two-sink subscriber into a dispatch owned by the facade.
pub(crate) fn build_dispatch(
    console: &SinkConfig,
    console_writer: BoxMakeWriter,
    file: &SinkConfig,
    file_writer: BoxMakeWriter,
) -> Dispatch {
    let layers = vec![
        sink_layer(console, CONSOLE_TARGET, console_writer),
        sink_layer(file, FILE_TARGET, file_writer),
    ];
    Dispatch::new(tracing_subscriber::registry().with(layers))
}
