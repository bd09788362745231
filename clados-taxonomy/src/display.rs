//! Plain-text tree rendering for inspection and logs

use clados_core::TaxonId;

use crate::tree::TaxonTree;

/// Render a tree as indented ASCII art, one node per line as
/// `name [rank]` (bare name when the taxon has no rank).
///
/// `max_depth` limits how many levels below the root are shown; deeper
/// nodes collapse into a `... N more` line. `None` renders everything.
pub fn format_tree(tree: &TaxonTree, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&node_label(tree, tree.root_id()));
    out.push('\n');
    write_children(tree, tree.root_id(), "", 1, max_depth, &mut out);
    out
}

fn node_label(tree: &TaxonTree, id: TaxonId) -> String {
    match tree.get(id) {
        Some(node) => match &node.rank {
            Some(rank) => format!("{} [{}]", node.scientific_name, rank),
            None => node.scientific_name.clone(),
        },
        None => String::new(),
    }
}

fn write_children(
    tree: &TaxonTree,
    id: TaxonId,
    prefix: &str,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut String,
) {
    let children = tree.children(id);
    if children.is_empty() {
        return;
    }

    if let Some(limit) = max_depth {
        if depth > limit {
            let hidden = tree.descendants(id).count();
            out.push_str(prefix);
            out.push_str(&format!("└─ ... {} more\n", hidden));
            return;
        }
    }

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└─ " } else { "├─ " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&node_label(tree, *child));
        out.push('\n');

        let child_prefix = if is_last {
            format!("{}   ", prefix)
        } else {
            format!("{}│  ", prefix)
        };
        write_children(tree, *child, &child_prefix, depth + 1, max_depth, out);
    }
}
