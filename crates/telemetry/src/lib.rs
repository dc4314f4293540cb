//! Logging and tracing bootstrap for the bookshelf service.

use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Build the filter for the configured directive, falling back to `info`
/// when the directive does not parse.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_new(&settings.log_level).unwrap_or_else(|err| {
        eprintln!(
            "invalid log level directive '{}': {err}; using '{FALLBACK_DIRECTIVE}'",
            settings.log_level
        );
        EnvFilter::new(FALLBACK_DIRECTIVE)
    })
}

/// Install the global tracing subscriber.
///
/// Calling this twice is an error; tests that need logs should use
/// `tracing_subscriber::fmt::try_init()` directly.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(settings));

    match settings.log_format {
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to install JSON subscriber: {err}"))?,
        LogFormat::Pretty => builder
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to install subscriber: {err}"))?,
    }

    tracing::info!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        level = %settings.log_level,
        "telemetry initialized"
    );

    Ok(())
}
