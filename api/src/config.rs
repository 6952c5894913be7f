//! Process-level setup driven by [`AppConfig`]

use jb_shared::{AppConfig, LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the log filter: `RUST_LOG` wins over the configured level
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Install the global tracing subscriber
///
/// Returns an error if a subscriber was already installed.
pub fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(logging);
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(logging.colored)
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_ansi(logging.colored))
            .try_init()?,
    }

    Ok(())
}

/// Log the configuration summary and any startup warnings
pub fn log_startup(config: &AppConfig) {
    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        storage = if config.database.is_some() { "mysql" } else { "memory" },
        mail = ?config.mail.provider,
        "Loaded configuration"
    );
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_uses_configured_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let logging = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(env_filter(&logging).to_string(), "warn");
    }
}
