//! Rank ontology: the ordered vocabulary of taxonomic ranks
//!
//! Ranks form a total order from most general (`superkingdom`) to most
//! specific (`forma`). All pruning decisions reduce to comparing rank
//! positions in this order, so the ontology is built once from
//! configuration and shared read-only.

use clados_core::{CladosError, CladosResult, TaxonomyConfig, DEFAULT_RANKS};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

static NCBI_ONTOLOGY: Lazy<RankOntology> = Lazy::new(|| {
    RankOntology::new(DEFAULT_RANKS.iter().map(|r| r.to_string()).collect())
        .expect("default rank table contains duplicates")
});

/// An ordered, duplicate-free sequence of rank names.
///
/// Position in the sequence is the rank's specificity: index 0 is the
/// most general rank, the last index the most specific. Lookups are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOntology {
    ranks: Vec<String>,
    index: HashMap<String, usize>,
}

impl RankOntology {
    /// Build an ontology from an ordered rank list.
    ///
    /// Fails with [`CladosError::Configuration`] if the list contains a
    /// duplicate name, since a duplicated rank has no single position.
    pub fn new(ranks: Vec<String>) -> CladosResult<Self> {
        let mut index = HashMap::with_capacity(ranks.len());
        for (i, rank) in ranks.iter().enumerate() {
            if index.insert(rank.clone(), i).is_some() {
                return Err(CladosError::Configuration(format!(
                    "Duplicate rank '{}' in rank table",
                    rank
                )));
            }
        }
        Ok(Self { ranks, index })
    }

    /// Build an ontology from the `ranks` field of a configuration
    pub fn from_config(config: &TaxonomyConfig) -> CladosResult<Self> {
        Self::new(config.ranks.clone())
    }

    /// The default NCBI rank ontology (29 ranks, superkingdom..forma)
    pub fn ncbi() -> &'static RankOntology {
        &NCBI_ONTOLOGY
    }

    /// Position of a rank name in the order.
    ///
    /// Returns [`CladosError::RankNotFound`] for names outside the
    /// ontology, including any difference in letter case.
    pub fn index_of(&self, rank: &str) -> CladosResult<usize> {
        self.index
            .get(rank)
            .copied()
            .ok_or_else(|| CladosError::RankNotFound(rank.to_string()))
    }

    /// Rank name at a position, or `None` past the end
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.ranks.get(index).map(String::as_str)
    }

    /// Whether a rank name is part of the ontology
    pub fn contains(&self, rank: &str) -> bool {
        self.index.contains_key(rank)
    }

    /// Number of ranks in the ontology
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterate rank names from most general to most specific
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranks.iter().map(String::as_str)
    }

    /// The most specific rank name, if any
    pub fn most_specific(&self) -> Option<&str> {
        self.ranks.last().map(String::as_str)
    }

    /// Compare two rank names by specificity.
    ///
    /// `MoreGeneral` means `a` sits above `b` in the hierarchy (lower
    /// index). Unknown names fail with [`CladosError::RankNotFound`].
    pub fn compare(&self, a: &str, b: &str) -> CladosResult<RankOrder> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        Ok(match ia.cmp(&ib) {
            std::cmp::Ordering::Less => RankOrder::MoreGeneral,
            std::cmp::Ordering::Equal => RankOrder::Equal,
            std::cmp::Ordering::Greater => RankOrder::MoreSpecific,
        })
    }
}

/// Relative position of one rank against another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// First rank is higher in the hierarchy (e.g. family vs genus)
    MoreGeneral,
    Equal,
    /// First rank is lower in the hierarchy (e.g. species vs genus)
    MoreSpecific,
}

/// A caller-facing way to pick a rank: by name or by position.
///
/// Both forms resolve to an ontology index before use; invalid input of
/// either kind is reported as [`CladosError::InvalidRank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankSelector {
    /// Select by rank name, e.g. `"genus"`
    Name(String),
    /// Select by position in the ontology order
    Index(usize),
}

impl RankSelector {
    /// Resolve the selector against an ontology.
    ///
    /// A name outside the ontology or an index past its end both fail
    /// with [`CladosError::InvalidRank`]; the two forms are otherwise
    /// interchangeable.
    pub fn resolve(&self, ontology: &RankOntology) -> CladosResult<usize> {
        match self {
            RankSelector::Name(name) => ontology
                .index_of(name)
                .map_err(|_| CladosError::InvalidRank(name.clone())),
            RankSelector::Index(idx) => {
                if *idx < ontology.len() {
                    Ok(*idx)
                } else {
                    Err(CladosError::InvalidRank(format!(
                        "rank index {} out of range (ontology has {} ranks)",
                        idx,
                        ontology.len()
                    )))
                }
            }
        }
    }
}

impl From<&str> for RankSelector {
    fn from(name: &str) -> Self {
        RankSelector::Name(name.to_string())
    }
}

impl From<String> for RankSelector {
    fn from(name: String) -> Self {
        RankSelector::Name(name)
    }
}

impl From<usize> for RankSelector {
    fn from(index: usize) -> Self {
        RankSelector::Index(index)
    }
}

impl fmt::Display for RankSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankSelector::Name(name) => write!(f, "{}", name),
            RankSelector::Index(idx) => write!(f, "#{}", idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_ontology() -> RankOntology {
        RankOntology::new(
            ["kingdom", "phylum", "class", "order", "family", "genus", "species"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_ncbi_ontology_order() {
        let ontology = RankOntology::ncbi();
        assert_eq!(ontology.len(), 29);
        assert_eq!(ontology.index_of("superkingdom").unwrap(), 0);
        assert_eq!(ontology.name_of(0), Some("superkingdom"));
        assert_eq!(ontology.most_specific(), Some("forma"));

        let genus = ontology.index_of("genus").unwrap();
        let species = ontology.index_of("species").unwrap();
        assert!(genus < species);
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let result = RankOntology::new(vec![
            "kingdom".to_string(),
            "genus".to_string(),
            "kingdom".to_string(),
        ]);
        assert!(matches!(result, Err(CladosError::Configuration(_))));
    }

    #[test]
    fn test_index_of_unknown_rank() {
        let ontology = small_ontology();
        match ontology.index_of("supergenus") {
            Err(CladosError::RankNotFound(rank)) => assert_eq!(rank, "supergenus"),
            other => panic!("Expected RankNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let ontology = small_ontology();
        assert!(ontology.contains("genus"));
        assert!(!ontology.contains("Genus"));
        assert!(ontology.index_of("GENUS").is_err());
    }

    #[test]
    fn test_compare() {
        let ontology = small_ontology();
        assert_eq!(
            ontology.compare("family", "species").unwrap(),
            RankOrder::MoreGeneral
        );
        assert_eq!(
            ontology.compare("genus", "genus").unwrap(),
            RankOrder::Equal
        );
        assert_eq!(
            ontology.compare("species", "kingdom").unwrap(),
            RankOrder::MoreSpecific
        );
        assert!(ontology.compare("genus", "cohort").is_err());
    }

    #[test]
    fn test_selector_resolution() {
        let ontology = small_ontology();

        let by_name = RankSelector::from("genus").resolve(&ontology).unwrap();
        let by_index = RankSelector::from(5usize).resolve(&ontology).unwrap();
        assert_eq!(by_name, by_index);
        assert_eq!(ontology.name_of(by_name), Some("genus"));
    }

    #[test]
    fn test_selector_invalid_rank() {
        let ontology = small_ontology();

        match RankSelector::from("tribe").resolve(&ontology) {
            Err(CladosError::InvalidRank(rank)) => assert_eq!(rank, "tribe"),
            other => panic!("Expected InvalidRank, got {:?}", other),
        }
        assert!(matches!(
            RankSelector::from(7usize).resolve(&ontology),
            Err(CladosError::InvalidRank(_))
        ));
    }

    #[test]
    fn test_iter_round_trip() {
        let ontology = small_ontology();
        let names: Vec<&str> = ontology.iter().collect();
        assert_eq!(names[0], "kingdom");
        assert_eq!(names[6], "species");
        for (i, name) in names.iter().enumerate() {
            assert_eq!(ontology.index_of(name).unwrap(), i);
        }
    }

    #[test]
    fn test_selector_display() {
        assert_eq!(RankSelector::from("genus").to_string(), "genus");
        assert_eq!(RankSelector::from(3usize).to_string(), "#3");
    }
}
