use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize logging for the CLI binaries.
///
/// Defaults to `info` level (per-file progress) unless overridden by
/// `SCRIVENER_LOG`.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var("SCRIVENER_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
