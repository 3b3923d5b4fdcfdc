use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor an explicit level is provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

static LOG_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_value` when it is set. Only the first call
/// has an effect: later calls (typically from other tests in the same
/// process) are no-ops.
pub fn log_init(default_value: Option<&str>) {
    LOG_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(default_value.unwrap_or(DEFAULT_LOG_LEVEL))
        });
        tracing_setup(filter);
    });
}

fn tracing_setup(filter: EnvFilter) {
    let format = tracing_subscriber::fmt::layer()
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact();

    // Another subscriber may already be installed by the embedding process.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init();
}
