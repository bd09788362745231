//! Tree normalization passes
//!
//! [`TreePruner`] bundles a rank ontology with the cleaning
//! configuration and applies three passes over a [`TaxonTree`]:
//! cleaning (environmental-sample and deprecated taxa), rank pruning
//! (cut everything below a target rank), and unclassified-clade
//! resolution. All passes mutate the tree in place, removing nodes a
//! whole subtree at a time.

use clados_core::{CladosError, CladosResult, TaxonId, TaxonRef, TaxonomyConfig};

use crate::rank::{RankOntology, RankSelector};
use crate::tree::TaxonTree;

/// Substring marking environmental-sample placeholder taxa
const ENVIRONMENTAL_MARKER: &str = "environmental";

/// Substrings marking classification placeholder clades
const UNCLASSIFIED_MARKERS: [&str; 2] = ["unclassified", "incertae"];

/// Switches for the pruning passes.
///
/// Defaults match the common normalization flow: clean first, drop
/// placeholder clades that no longer shelter classified taxa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneOptions {
    /// Retain "unclassified"/"incertae sedis" clades even when none of
    /// their remaining descendants carries a recognized rank
    pub keep_unclassified: bool,
    /// Run the cleaning pass before pruning
    pub clean: bool,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            keep_unclassified: false,
            clean: true,
        }
    }
}

/// Applies cleaning and rank-pruning passes to taxonomic trees.
///
/// Holds references to the shared read-only ontology and configuration;
/// the trees it operates on are borrowed mutably per call, so one
/// pruner can serve many trees.
pub struct TreePruner<'a> {
    ontology: &'a RankOntology,
    config: &'a TaxonomyConfig,
}

impl<'a> TreePruner<'a> {
    pub fn new(ontology: &'a RankOntology, config: &'a TaxonomyConfig) -> Self {
        Self { ontology, config }
    }

    /// Remove administrative placeholder taxa.
    ///
    /// Detaches every descendant (the root is exempt) whose scientific
    /// name contains `"environmental"` or exactly matches a deprecated
    /// name from the configuration, together with its whole subtree.
    /// Returns the number of nodes removed; idempotent.
    pub fn clean(&self, tree: &mut TaxonTree) -> usize {
        let candidates: Vec<TaxonId> = tree
            .descendants(tree.root_id())
            .filter(|id| {
                tree.get(*id).map_or(false, |node| {
                    node.scientific_name.contains(ENVIRONMENTAL_MARKER)
                        || self.config.is_deprecated(&node.scientific_name)
                })
            })
            .collect();

        let mut removed = 0;
        for id in candidates {
            // A candidate inside an already-removed subtree is gone by
            // the time it is reached; remove_subtree counts it as zero.
            removed += tree.remove_subtree(id);
        }

        if removed > 0 {
            tracing::debug!("Cleaning removed {} nodes", removed);
        }
        removed
    }

    /// Cut the tree down to a target rank.
    ///
    /// After a successful call no surviving node carries a recognized
    /// rank more specific than the target, and every node at the target
    /// rank is a leaf. Nodes with an absent or unrecognized rank are
    /// kept unless they sit below a node at the target rank. Returns
    /// the number of nodes removed.
    ///
    /// Fails with [`CladosError::InvalidRank`] when the selector names
    /// an unknown rank or an out-of-range index. The cleaning pass runs
    /// before the rank is validated, so with `options.clean` enabled an
    /// invalid rank leaves the tree cleaned but not pruned.
    pub fn prune_to_rank<S>(
        &self,
        tree: &mut TaxonTree,
        rank: S,
        options: PruneOptions,
    ) -> CladosResult<usize>
    where
        S: Into<RankSelector>,
    {
        let selector = rank.into();
        let mut removed = 0;

        if options.clean {
            removed += self.clean(tree);
        }

        let target = selector.resolve(self.ontology)?;

        removed += self.rank_sweep(tree, target);

        if !options.keep_unclassified {
            removed += self.unclassified_pass(tree);
        }

        tracing::debug!(
            "Pruned to rank {}: removed {} nodes, {} remain",
            selector,
            removed,
            tree.len()
        );
        Ok(removed)
    }

    /// Cut the tree down to a target rank while preserving the taxa in
    /// `keep` below the cut.
    ///
    /// Each kept taxon is re-attached, pruned to its own native rank,
    /// under its nearest ancestor at the target rank. A kept taxon
    /// already at the target rank survives the main prune as a leaf and
    /// needs no re-attachment. Returns the net number of nodes removed.
    ///
    /// All of `keep` is resolved before the tree is touched:
    /// [`CladosError::TaxonNotFound`] for names or ids absent from the
    /// tree, [`CladosError::InvalidRank`] for a kept taxon without a
    /// recognized rank, and [`CladosError::AnchorNotFound`] for a kept
    /// taxon with no lineage member at the target rank all leave the
    /// tree unmodified. If an anchor is itself removed by the main
    /// prune (a deprecated or placeholder ancestor), re-attachment
    /// fails with [`CladosError::AnchorNotFound`] and the tree is left
    /// globally pruned without the preserved taxon.
    pub fn prune_taxa<S>(
        &self,
        tree: &mut TaxonTree,
        rank: S,
        keep: &[TaxonRef],
        options: PruneOptions,
    ) -> CladosResult<usize>
    where
        S: Into<RankSelector>,
    {
        let selector = rank.into();
        let target = selector.resolve(self.ontology)?;
        let target_rank = self
            .ontology
            .name_of(target)
            .ok_or_else(|| CladosError::InvalidRank(selector.to_string()))?
            .to_string();

        let mut keep_ids: Vec<TaxonId> = Vec::with_capacity(keep.len());
        for taxon in keep {
            let id = Self::resolve_taxon_ref(tree, taxon)?;
            if !keep_ids.contains(&id) {
                keep_ids.push(id);
            }
        }

        let mut grafts: Vec<(TaxonId, TaxonTree)> = Vec::new();
        for id in keep_ids {
            let anchor = tree.ancestor_at_rank(id, &target_rank)?.ok_or_else(|| {
                CladosError::AnchorNotFound {
                    taxon: id,
                    rank: target_rank.clone(),
                }
            })?;
            if anchor == id {
                continue;
            }

            let native_rank = tree
                .get(id)
                .and_then(|node| node.rank.clone())
                .ok_or_else(|| {
                    CladosError::InvalidRank(format!("kept taxon {} has no rank", id))
                })?;

            let mut saved = tree.subtree(id)?;
            self.prune_to_rank(
                &mut saved,
                RankSelector::Name(native_rank),
                PruneOptions::default(),
            )?;
            grafts.push((anchor, saved));
        }

        let before = tree.len();

        if options.clean {
            self.clean(tree);
        }
        self.rank_sweep(tree, target);
        if !options.keep_unclassified {
            self.unclassified_pass(tree);
        }

        for (anchor, saved) in grafts {
            if !tree.contains(anchor) {
                return Err(CladosError::AnchorNotFound {
                    taxon: saved.root_id(),
                    rank: target_rank.clone(),
                });
            }
            tree.attach_subtree(anchor, saved)?;
        }

        let removed = before.saturating_sub(tree.len());
        tracing::debug!(
            "Pruned to rank {} keeping {} taxa: removed {} nodes, {} remain",
            selector,
            keep.len(),
            removed,
            tree.len()
        );
        Ok(removed)
    }

    /// Detach nodes rank by rank, most specific first, so that later
    /// detaches only ever see nodes still present in the tree.
    fn rank_sweep(&self, tree: &mut TaxonTree, target: usize) -> usize {
        let root = tree.root_id();
        let mut removed = 0;

        for idx in (target..self.ontology.len()).rev() {
            let rank = match self.ontology.name_of(idx) {
                Some(rank) => rank,
                None => continue,
            };

            if idx > target {
                for id in tree.nodes_at_rank(rank) {
                    // The root stays whatever its rank
                    if id != root {
                        removed += tree.remove_subtree(id);
                    }
                }
            } else {
                // Nodes at the target rank become leaves: everything
                // below them goes, recognized rank or not.
                for holder in tree.nodes_at_rank(rank) {
                    if !tree.contains(holder) {
                        continue;
                    }
                    let below: Vec<TaxonId> = tree.descendants(holder).collect();
                    for id in below {
                        removed += tree.remove_subtree(id);
                    }
                }
            }
        }
        removed
    }

    /// Drop placeholder clades that shelter no classified descendants.
    fn unclassified_pass(&self, tree: &mut TaxonTree) -> usize {
        let candidates: Vec<TaxonId> = tree
            .descendants(tree.root_id())
            .filter(|id| {
                tree.get(*id).map_or(false, |node| {
                    UNCLASSIFIED_MARKERS
                        .iter()
                        .any(|marker| node.scientific_name.contains(marker))
                })
            })
            .collect();

        let mut removed = 0;
        for id in candidates {
            if !tree.contains(id) {
                continue;
            }
            let shelters_classified = tree.descendants(id).any(|descendant| {
                tree.get(descendant)
                    .and_then(|node| node.rank.as_deref())
                    .map_or(false, |rank| self.ontology.contains(rank))
            });
            if !shelters_classified {
                removed += tree.remove_subtree(id);
            }
        }
        removed
    }

    fn resolve_taxon_ref(tree: &TaxonTree, taxon: &TaxonRef) -> CladosResult<TaxonId> {
        match taxon {
            TaxonRef::Id(id) => {
                if tree.contains(*id) {
                    Ok(*id)
                } else {
                    Err(CladosError::TaxonNotFound(id.to_string()))
                }
            }
            TaxonRef::Name(name) => tree
                .find_by_name(name)
                .ok_or_else(|| CladosError::TaxonNotFound(name.clone())),
        }
    }
}
