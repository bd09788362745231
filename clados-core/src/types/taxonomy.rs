/// Taxonomy identifier types used throughout clados
use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxon ID type - newtype pattern for type safety
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TaxonId(pub u32);

impl TaxonId {
    /// NCBI convention for unassigned material
    pub const UNCLASSIFIED: Self = Self(0);
    /// NCBI root of the tree of life
    pub const ROOT: Self = Self(1);

    /// Create a new TaxonId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Check if this is the root taxon (1)
    pub fn is_root(&self) -> bool {
        self.0 == 1
    }

    /// Check if this is unclassified (0)
    pub fn is_unclassified(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

/// A taxon argument given either as an identifier or as a scientific name.
///
/// Replaces the duck-typed "int or str" arguments of upstream taxonomy
/// tooling with an explicit sum type. Name resolution is left to whatever
/// holds the names: a [`TaxonRef::Name`] is matched against a tree's own
/// nodes or against a provider's name index, depending on the operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxonRef {
    /// Resolved taxon identifier
    Id(TaxonId),
    /// Scientific name still to be resolved
    Name(String),
}

impl From<TaxonId> for TaxonRef {
    fn from(id: TaxonId) -> Self {
        Self::Id(id)
    }
}

impl From<u32> for TaxonRef {
    fn from(id: u32) -> Self {
        Self::Id(TaxonId(id))
    }
}

impl From<&str> for TaxonRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TaxonRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for TaxonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}
