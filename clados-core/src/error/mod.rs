//! Core error types for clados

use crate::types::TaxonId;
use thiserror::Error;

/// Main error type for clados operations
#[derive(Error, Debug)]
pub enum CladosError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A rank argument failed validation at an operation boundary: the
    /// name is not in the ontology, or the index is past its last rank.
    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    /// An ontology lookup was asked for a name it does not carry.
    #[error("Rank not found in ontology: {0}")]
    RankNotFound(String),

    #[error("Taxon not found: {0}")]
    TaxonNotFound(String),

    #[error("Duplicate taxon: {0}")]
    DuplicateTaxon(TaxonId),

    /// A preserved taxon's ancestor at the target rank is missing, either
    /// from its lineage or from the pruned tree it was to rejoin.
    #[error("No surviving ancestor of taxon {taxon} at rank '{rank}'")]
    AnchorNotFound { taxon: TaxonId, rank: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for clados operations
pub type CladosResult<T> = Result<T, CladosError>;

// Conversion implementations for common error types
impl From<serde_json::Error> for CladosError {
    fn from(err: serde_json::Error) -> Self {
        CladosError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CladosError {
    fn from(err: toml::de::Error) -> Self {
        CladosError::Configuration(err.to_string())
    }
}
