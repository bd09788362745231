//! Logging setup shared by binaries and tests
//!
//! Reads the `CLADOS_LOG` environment variable for the default filter,
//! with `RUST_LOG` taking precedence when set.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs a
/// subscriber.
pub fn init() {
    let log_level = std::env::var("CLADOS_LOG").unwrap_or_else(|_| "warn".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
