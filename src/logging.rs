use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // SystemTime is unavailable on wasm32-unknown-unknown.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
