//! Shared type definitions

pub mod taxonomy;

pub use taxonomy::{TaxonId, TaxonRef};
