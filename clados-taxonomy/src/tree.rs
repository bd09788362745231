//! In-memory taxonomic tree
//!
//! Nodes live in an arena keyed by [`TaxonId`] and refer to each other
//! through identifiers rather than references, so subtrees can be
//! detached and re-attached without fighting the borrow checker. All
//! structural edits go through [`TaxonTree`] methods, which keep parent
//! and child links consistent.

use clados_core::{CladosError, CladosResult, TaxonId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Payload for one taxon: identifier, scientific name, optional rank.
///
/// A `None` rank models taxa that NCBI marks "no rank" (clades,
/// unranked intermediates). Rank strings are free-form here; whether a
/// rank participates in ordering is the ontology's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    pub id: TaxonId,
    pub scientific_name: String,
    pub rank: Option<String>,
}

impl Taxon {
    pub fn new(id: impl Into<TaxonId>, scientific_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            scientific_name: scientific_name.into(),
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }
}

/// A taxon plus its position in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonNode {
    pub id: TaxonId,
    pub scientific_name: String,
    pub rank: Option<String>,
    parent: Option<TaxonId>,
    children: Vec<TaxonId>,
}

impl TaxonNode {
    fn from_taxon(taxon: Taxon, parent: Option<TaxonId>) -> Self {
        Self {
            id: taxon.id,
            scientific_name: taxon.scientific_name,
            rank: taxon.rank,
            parent,
            children: Vec::new(),
        }
    }

    /// Parent identifier; `None` for the root
    pub fn parent(&self) -> Option<TaxonId> {
        self.parent
    }

    /// Child identifiers in insertion order
    pub fn children(&self) -> &[TaxonId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's payload, detached from its tree position
    pub fn taxon(&self) -> Taxon {
        Taxon {
            id: self.id,
            scientific_name: self.scientific_name.clone(),
            rank: self.rank.clone(),
        }
    }
}

/// Rooted tree of taxa backed by an id-keyed arena.
///
/// The root is fixed at construction and is never detached by any
/// operation. Iteration order over the arena follows insertion order;
/// traversal order follows child links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonTree {
    nodes: IndexMap<TaxonId, TaxonNode>,
    root: TaxonId,
}

impl TaxonTree {
    /// Create a tree holding only the given root taxon
    pub fn new(root: Taxon) -> Self {
        let root_id = root.id;
        let mut nodes = IndexMap::new();
        nodes.insert(root_id, TaxonNode::from_taxon(root, None));
        Self {
            nodes,
            root: root_id,
        }
    }

    pub fn root_id(&self) -> TaxonId {
        self.root
    }

    pub fn root(&self) -> &TaxonNode {
        &self.nodes[&self.root]
    }

    pub fn get(&self, id: TaxonId) -> Option<&TaxonNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: TaxonId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Parent of a node; `None` for the root or an unknown id
    pub fn parent(&self, id: TaxonId) -> Option<TaxonId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for leaves and unknown ids
    pub fn children(&self, id: TaxonId) -> &[TaxonId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a taxon as the last child of `parent_id`.
    ///
    /// Fails with [`CladosError::TaxonNotFound`] if the parent is not in
    /// the tree and [`CladosError::DuplicateTaxon`] if the id already
    /// is.
    pub fn add_child(&mut self, parent_id: TaxonId, taxon: Taxon) -> CladosResult<TaxonId> {
        if !self.nodes.contains_key(&parent_id) {
            return Err(CladosError::TaxonNotFound(parent_id.to_string()));
        }
        let id = taxon.id;
        if self.nodes.contains_key(&id) {
            return Err(CladosError::DuplicateTaxon(id));
        }

        self.nodes.insert(id, TaxonNode::from_taxon(taxon, Some(parent_id)));
        self.nodes[&parent_id].children.push(id);
        Ok(id)
    }

    /// All node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = TaxonId> + '_ {
        self.nodes.keys().copied()
    }

    /// Depth-first pre-order traversal starting at the root
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Pre-order traversal of everything below `id`, excluding `id`
    /// itself. Empty for leaves and unknown ids.
    pub fn descendants(&self, id: TaxonId) -> PreOrderIter<'_> {
        let mut stack: Vec<TaxonId> = self.children(id).to_vec();
        stack.reverse();
        PreOrderIter { tree: self, stack }
    }

    /// Ids of all leaf nodes, in pre-order
    pub fn leaves(&self) -> Vec<TaxonId> {
        self.iter()
            .filter(|id| self.nodes[id].is_leaf())
            .collect()
    }

    /// Path from the root down to `id`, both included.
    ///
    /// Fails with [`CladosError::TaxonNotFound`] for unknown ids.
    pub fn lineage(&self, id: TaxonId) -> CladosResult<Vec<TaxonId>> {
        if !self.nodes.contains_key(&id) {
            return Err(CladosError::TaxonNotFound(id.to_string()));
        }

        let mut lineage = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            lineage.push(node_id);
            current = self.nodes.get(&node_id).and_then(|n| n.parent);
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// Nearest lineage member of `id` (the node itself included) whose
    /// rank equals `rank`, walking upward toward the root.
    pub fn ancestor_at_rank(&self, id: TaxonId, rank: &str) -> CladosResult<Option<TaxonId>> {
        if !self.nodes.contains_key(&id) {
            return Err(CladosError::TaxonNotFound(id.to_string()));
        }

        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[&node_id];
            if node.rank.as_deref() == Some(rank) {
                return Ok(Some(node_id));
            }
            current = node.parent;
        }
        Ok(None)
    }

    /// First node (pre-order) whose scientific name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<TaxonId> {
        self.iter()
            .find(|id| self.nodes[id].scientific_name == name)
    }

    /// All nodes (pre-order) carrying exactly the given rank
    pub fn nodes_at_rank(&self, rank: &str) -> Vec<TaxonId> {
        self.iter()
            .filter(|id| self.nodes[id].rank.as_deref() == Some(rank))
            .collect()
    }

    /// Remove the subtree rooted at `id` and return how many nodes were
    /// removed.
    ///
    /// The root cannot be detached; asking for it fails with
    /// [`CladosError::InvalidInput`], unknown ids with
    /// [`CladosError::TaxonNotFound`].
    pub fn detach(&mut self, id: TaxonId) -> CladosResult<usize> {
        if id == self.root {
            return Err(CladosError::InvalidInput(
                "cannot detach the root of a tree".to_string(),
            ));
        }
        if !self.nodes.contains_key(&id) {
            return Err(CladosError::TaxonNotFound(id.to_string()));
        }
        Ok(self.remove_subtree(id))
    }

    /// Unlink `id` from its parent and drop its whole subtree.
    ///
    /// Infallible by design for use in traversal-driven passes: an
    /// absent id removes nothing. Callers must not pass the root.
    pub(crate) fn remove_subtree(&mut self, id: TaxonId) -> usize {
        let parent = match self.nodes.get(&id) {
            Some(node) => node.parent,
            None => return 0,
        };
        if let Some(parent_id) = parent {
            let siblings = &mut self.nodes[&parent_id].children;
            siblings.retain(|child| *child != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.nodes.shift_remove(&node_id) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Copy of the subtree rooted at `id`, as a standalone tree whose
    /// root is `id`.
    pub fn subtree(&self, id: TaxonId) -> CladosResult<TaxonTree> {
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| CladosError::TaxonNotFound(id.to_string()))?;

        let mut sub = TaxonTree::new(node.taxon());
        let mut stack: Vec<(TaxonId, TaxonId)> =
            node.children.iter().rev().map(|c| (*c, id)).collect();
        while let Some((node_id, parent_id)) = stack.pop() {
            let node = &self.nodes[&node_id];
            sub.add_child(parent_id, node.taxon())?;
            stack.extend(node.children.iter().rev().map(|c| (*c, node_id)));
        }
        Ok(sub)
    }

    /// Graft a standalone tree as the last child of `parent_id`,
    /// returning how many nodes were added.
    ///
    /// Every id in the grafted tree must be absent from this one;
    /// otherwise the graft is refused with
    /// [`CladosError::DuplicateTaxon`] and the tree is unchanged.
    pub fn attach_subtree(&mut self, parent_id: TaxonId, sub: TaxonTree) -> CladosResult<usize> {
        if !self.nodes.contains_key(&parent_id) {
            return Err(CladosError::TaxonNotFound(parent_id.to_string()));
        }
        for id in sub.node_ids() {
            if self.nodes.contains_key(&id) {
                return Err(CladosError::DuplicateTaxon(id));
            }
        }

        let sub_root = sub.root;
        let order: Vec<TaxonId> = sub.iter().collect();
        let mut attached = 0;
        for id in order {
            let mut node = sub.nodes[&id].clone();
            if id == sub_root {
                node.parent = Some(parent_id);
            }
            self.nodes.insert(id, node);
            attached += 1;
        }
        self.nodes[&parent_id].children.push(sub_root);
        Ok(attached)
    }

    /// Structural consistency check: every child link has a matching
    /// parent link, the root has no parent, and every node is reachable
    /// from the root.
    pub fn is_valid(&self) -> bool {
        let root = match self.nodes.get(&self.root) {
            Some(node) => node,
            None => return false,
        };
        if root.parent.is_some() {
            return false;
        }

        for (id, node) in &self.nodes {
            if node.id != *id {
                return false;
            }
            for child in &node.children {
                match self.nodes.get(child) {
                    Some(child_node) if child_node.parent == Some(*id) => {}
                    _ => return false,
                }
            }
            if let Some(parent_id) = node.parent {
                match self.nodes.get(&parent_id) {
                    Some(parent) if parent.children.contains(id) => {}
                    _ => return false,
                }
            }
        }

        self.iter().count() == self.nodes.len()
    }
}

/// Stack-based pre-order traversal over a [`TaxonTree`]
pub struct PreOrderIter<'t> {
    tree: &'t TaxonTree,
    stack: Vec<TaxonId>,
}

impl<'t> Iterator for PreOrderIter<'t> {
    type Item = TaxonId;

    fn next(&mut self) -> Option<TaxonId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.tree.nodes.get(&id) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(id)
    }
}
