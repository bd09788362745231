//! Core utilities and types shared across all clados crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{load_config, save_config, TaxonomyConfig, DEFAULT_RANKS};
pub use error::{CladosError, CladosResult};

// Re-export core types
pub use types::{TaxonId, TaxonRef};

/// Version information for the clados project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
