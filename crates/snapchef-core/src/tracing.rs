use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: our crates at `debug`, HTTP request
/// spans at `info`, everything else at `warn`.
pub const DEFAULT_DIRECTIVES: &str = "warn,snapchef_api=debug,snapchef_core=info,tower_http=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the JSON stdout subscriber. Call once at startup.
///
/// Later calls are ignored, so tests may call it freely.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
