//! Taxonomic tree construction and rank-bounded pruning
//!
//! Takes an in-memory taxonomic classification tree and normalizes it:
//! strips administrative placeholder taxa (environmental samples,
//! deprecated names), cuts the tree down to a target rank, and resolves
//! "unclassified"/"incertae sedis" clades that shelter no classified
//! descendants. Rank order comes from a configurable [`RankOntology`];
//! trees are arenas of identifier-linked nodes built directly or
//! through a [`TaxonProvider`].
//!
//! ```
//! use clados_core::{TaxonRef, TaxonomyConfig};
//! use clados_taxonomy::{
//!     format_tree, PruneOptions, RankOntology, TaxonProvider, TaxonRecord, TaxonStore,
//!     TreePruner,
//! };
//!
//! # fn main() -> clados_core::CladosResult<()> {
//! let config = TaxonomyConfig::default();
//! let mut store = TaxonStore::with_config(&config);
//! store.add_taxon(TaxonRecord::new(1u32, "Hominidae").with_rank("family"))?;
//! store.add_taxon(TaxonRecord::new(2u32, "Homo").with_rank("genus").with_parent(1u32))?;
//! store.add_taxon(
//!     TaxonRecord::new(3u32, "Homo sapiens")
//!         .with_rank("species")
//!         .with_parent(2u32),
//! )?;
//!
//! let mut tree = store.descendant_tree(&TaxonRef::from("Hominidae"))?;
//!
//! let pruner = TreePruner::new(RankOntology::ncbi(), &config);
//! pruner.prune_to_rank(&mut tree, "genus", PruneOptions::default())?;
//!
//! assert_eq!(tree.len(), 2);
//! println!("{}", format_tree(&tree, None));
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod prune;
pub mod provider;
pub mod rank;
pub mod tree;

pub use display::format_tree;
pub use prune::{PruneOptions, TreePruner};
pub use provider::{TaxonProvider, TaxonRecord, TaxonStore};
pub use rank::{RankOntology, RankOrder, RankSelector};
pub use tree::{PreOrderIter, Taxon, TaxonNode, TaxonTree};

// Re-export the shared core types so downstream users need one import
pub use clados_core::{CladosError, CladosResult, TaxonId, TaxonRef};
