//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Default filter for the development profile when `RUST_LOG` is unset
pub const DEVELOPMENT_FILTER: &str = "bookkeeper_core=debug,bookkeeper_store=debug";

/// Default filter for the production profile when `RUST_LOG` is unset
pub const PRODUCTION_FILTER: &str = "bookkeeper_core=info,bookkeeper_store=info";

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// It sets up the tracing subscriber based on the selected profile. If a
/// global subscriber is already installed, it is left in place.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level, SQL included
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// `RUST_LOG` overrides the profile's default filter.
///
/// # Example
///
/// ```
/// use bookkeeper_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(DEVELOPMENT_FILTER)),
                    )
                    .try_init()
                    .ok();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(PRODUCTION_FILTER)),
                    )
                    .try_init()
                    .ok();
            }
            Profile::Test => {
                // Test capture is installed separately via init_test_capture();
                // a capture subscriber that is already in place wins.
                tracing_subscriber::registry().try_init().ok();
            }
        }
    });
}
