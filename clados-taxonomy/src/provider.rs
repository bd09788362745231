//! Taxonomy source abstraction
//!
//! The tree-normalization core takes fully built [`TaxonTree`]s as
//! input; where those trees come from is behind [`TaxonProvider`].
//! [`TaxonStore`] is the in-memory implementation used by tests and by
//! callers that already hold a taxonomy dump. Network-backed providers
//! live outside this crate and plug in through the same trait.

use clados_core::{CladosError, CladosResult, TaxonId, TaxonRef, TaxonomyConfig};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tree::{Taxon, TaxonTree};

/// Read-only lookups exposed by a taxonomy source.
pub trait TaxonProvider {
    /// Scientific name for an identifier
    fn name_of(&self, id: TaxonId) -> Option<String>;

    /// Identifier for a scientific name
    fn name_to_id(&self, name: &str) -> Option<TaxonId>;

    /// Rank name for an identifier, if the taxon carries one
    fn rank_of(&self, id: TaxonId) -> Option<String>;

    /// Ancestor identifiers from the root down to `id`, both included
    fn lineage_of(&self, id: TaxonId) -> Vec<TaxonId>;

    /// Build the tree of `root` and all of its descendants
    fn descendant_tree(&self, root: &TaxonRef) -> CladosResult<TaxonTree>;

    /// Resolve a name-or-id reference to an identifier.
    ///
    /// Fails with [`CladosError::TaxonNotFound`] when the reference
    /// does not correspond to a known taxon.
    fn resolve(&self, taxon: &TaxonRef) -> CladosResult<TaxonId> {
        match taxon {
            TaxonRef::Id(id) => {
                if self.name_of(*id).is_some() {
                    Ok(*id)
                } else {
                    Err(CladosError::TaxonNotFound(id.to_string()))
                }
            }
            TaxonRef::Name(name) => self
                .name_to_id(name)
                .ok_or_else(|| CladosError::TaxonNotFound(name.clone())),
        }
    }

    /// Lineage member of `taxon` carrying the given rank, scanning from
    /// the root downward; `None` when the lineage has no such member.
    fn ancestor_at_rank(&self, taxon: &TaxonRef, rank: &str) -> CladosResult<Option<TaxonId>> {
        let id = self.resolve(taxon)?;
        for ancestor in self.lineage_of(id) {
            if self.rank_of(ancestor).as_deref() == Some(rank) {
                return Ok(Some(ancestor));
            }
        }
        Ok(None)
    }
}

/// One row of a taxonomy source: a taxon plus its parent link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    pub id: TaxonId,
    pub scientific_name: String,
    pub rank: Option<String>,
    pub parent: Option<TaxonId>,
}

impl TaxonRecord {
    pub fn new(id: impl Into<TaxonId>, scientific_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scientific_name: scientific_name.into(),
            rank: None,
            parent: None,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<TaxonId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    fn taxon(&self) -> Taxon {
        Taxon {
            id: self.id,
            scientific_name: self.scientific_name.clone(),
            rank: self.rank.clone(),
        }
    }
}

/// In-memory taxonomy source.
///
/// Rows are keyed by identifier; a name index answers reverse lookups
/// after normalizing queries through the configured character
/// substitutions (e.g. `+` for space in scraped names).
#[derive(Debug, Clone, Default)]
pub struct TaxonStore {
    taxa: IndexMap<TaxonId, TaxonRecord>,
    children: HashMap<TaxonId, Vec<TaxonId>>,
    names: HashMap<String, TaxonId>,
    special_chars: Vec<(String, String)>,
}

impl TaxonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose name lookups apply the configuration's character
    /// substitutions.
    pub fn with_config(config: &TaxonomyConfig) -> Self {
        // Sorted so overlapping patterns apply in the same order on
        // every run.
        let mut special_chars: Vec<(String, String)> = config
            .special_chars
            .iter()
            .map(|(pattern, replacement)| (pattern.clone(), replacement.clone()))
            .collect();
        special_chars.sort();

        Self {
            special_chars,
            ..Self::default()
        }
    }

    /// Apply the configured character substitutions to a name
    pub fn normalize_name(&self, name: &str) -> String {
        let mut normalized = name.to_string();
        for (pattern, replacement) in &self.special_chars {
            normalized = normalized.replace(pattern.as_str(), replacement);
        }
        normalized
    }

    /// Insert a row.
    ///
    /// Parents must be inserted before their children; a row naming an
    /// unknown parent fails with [`CladosError::TaxonNotFound`], a
    /// repeated id with [`CladosError::DuplicateTaxon`]. The first row
    /// to claim a name wins the name index.
    pub fn add_taxon(&mut self, record: TaxonRecord) -> CladosResult<()> {
        if self.taxa.contains_key(&record.id) {
            return Err(CladosError::DuplicateTaxon(record.id));
        }
        if let Some(parent) = record.parent {
            if !self.taxa.contains_key(&parent) {
                return Err(CladosError::TaxonNotFound(parent.to_string()));
            }
            self.children.entry(parent).or_default().push(record.id);
        }

        let normalized = self.normalize_name(&record.scientific_name);
        self.names.entry(normalized).or_insert(record.id);
        self.taxa.insert(record.id, record);
        Ok(())
    }

    pub fn get(&self, id: TaxonId) -> Option<&TaxonRecord> {
        self.taxa.get(&id)
    }

    pub fn contains(&self, id: TaxonId) -> bool {
        self.taxa.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    /// Direct children of a taxon, in insertion order
    pub fn children_of(&self, id: TaxonId) -> &[TaxonId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl TaxonProvider for TaxonStore {
    fn name_of(&self, id: TaxonId) -> Option<String> {
        self.taxa.get(&id).map(|record| record.scientific_name.clone())
    }

    fn name_to_id(&self, name: &str) -> Option<TaxonId> {
        self.names.get(&self.normalize_name(name)).copied()
    }

    fn rank_of(&self, id: TaxonId) -> Option<String> {
        self.taxa.get(&id).and_then(|record| record.rank.clone())
    }

    fn lineage_of(&self, id: TaxonId) -> Vec<TaxonId> {
        let mut lineage = Vec::new();
        let mut current = Some(id);

        while let Some(taxon_id) = current {
            lineage.push(taxon_id);
            current = self.taxa.get(&taxon_id).and_then(|record| record.parent);
        }

        lineage.reverse();
        lineage
    }

    fn descendant_tree(&self, root: &TaxonRef) -> CladosResult<TaxonTree> {
        let root_id = self.resolve(root)?;
        let record = self
            .taxa
            .get(&root_id)
            .ok_or_else(|| CladosError::TaxonNotFound(root_id.to_string()))?;

        let mut tree = TaxonTree::new(record.taxon());
        let mut stack: Vec<TaxonId> = self.children_of(root_id).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(child) = self.taxa.get(&id) {
                if let Some(parent) = child.parent {
                    tree.add_child(parent, child.taxon())?;
                }
                stack.extend(self.children_of(id).iter().rev());
            }
        }

        tracing::debug!(
            "Built descendant tree for taxon {}: {} nodes",
            root_id,
            tree.len()
        );
        Ok(tree)
    }
}
