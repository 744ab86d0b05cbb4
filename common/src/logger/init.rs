use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Install the global subscriber once per process.
///
/// `RUST_LOG` drives the filter (defaults to `info`). With `json` set, every
/// event is emitted as one JSON object per line, which is what log shippers
/// in front of the reconciler expect.
pub fn init_logger(service_name: &'static str, json: bool) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let base = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        let registry = tracing_subscriber::registry().with(filter);

        // try_init: a test harness may already own the global dispatcher.
        let _ = if json {
            registry.with(base.json()).try_init()
        } else {
            registry.with(base).try_init()
        };

        tracing::info!(service = service_name, json, "logger initialized");
    });
}
