//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; the host process calls
//! [`init_tracing`] once at startup to choose where they go.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{EngineSettings, LogFormat};
use crate::error::AppError;

/// Service name reported in Bunyan records
pub const SERVICE_NAME: &str = "languagepeer-feedback";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(settings: &EngineSettings) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&settings.log_filter)?;
    let registry = Registry::default().with(filter);

    let result = match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Bunyan => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_string(),
                std::io::stdout,
            ))
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let settings = EngineSettings {
            log_filter: "warn".to_string(),
            ..Default::default()
        };

        // The first call may lose a race with other tests; the second never succeeds
        let _ = init_tracing(&settings);
        assert!(matches!(init_tracing(&settings), Err(AppError::Config(_))));
    }
}
