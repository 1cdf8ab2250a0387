use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Default filter in production when `RUST_LOG` is unset.
const PRODUCTION_FILTER: &str = "warn,domain_catalog=info,catalog_cli=info";

/// Default filter in development when `RUST_LOG` is unset.
const DEVELOPMENT_FILTER: &str = "info,domain_catalog=debug,catalog_cli=debug,sea_orm=warn";

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in `main()`, before any fallible operation. Safe to call
/// multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Build the filter used by [`init_tracing`]: `RUST_LOG` wins, otherwise the
/// environment's default directives.
pub fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new(PRODUCTION_FILTER)
        } else {
            EnvFilter::new(DEVELOPMENT_FILTER)
        }
    })
}

/// Initialize tracing with environment-aware formatting and span capture.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events without targets.
/// - **Development** (default): pretty, human-readable events.
///
/// Both install `tracing_error::ErrorLayer` so eyre reports carry span traces.
/// Calling this more than once is a no-op after the first successful call.
pub fn init_tracing(environment: &Environment) {
    let filter = env_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_defaults_per_environment() {
        temp_env::with_var_unset("RUST_LOG", || {
            let dev = env_filter(&Environment::Development).to_string();
            assert!(dev.contains("domain_catalog=debug"));

            let prod = env_filter(&Environment::Production).to_string();
            assert!(prod.contains("domain_catalog=info"));
        });
    }

    #[test]
    fn test_env_filter_honours_rust_log() {
        temp_env::with_var("RUST_LOG", Some("domain_catalog=trace"), || {
            let filter = env_filter(&Environment::Production).to_string();
            assert!(filter.contains("domain_catalog=trace"));
        });
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }
}
