//! Human-inspectable dumps of the last recorded search tree.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::ai::{Budget, Pruning, SearchNode, SearchTree};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// Indented move/value listing.
    Listing,
    /// Graphviz digraph.
    Dot,
}

impl TreeFormat {
    /// `.dot` and `.gv` files get Graphviz output, anything else the listing.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("dot") | Some("gv") => TreeFormat::Dot,
            _ => TreeFormat::Listing,
        }
    }
}

fn describe_budget(budget: Budget) -> String {
    match budget {
        Budget::Depth(d) => format!("depth {d}"),
        Budget::Time(ms) => format!("{ms} ms"),
    }
}

fn node_label(node: &SearchNode) -> String {
    let mv = match (node.mv, node.side) {
        (Some(mv), Some(side)) => format!("{side} {mv}"),
        _ => "root".to_string(),
    };
    match node.value {
        Some(value) => format!("{mv} = {value}"),
        None if node.pruned => format!("{mv} pruned"),
        None => mv,
    }
}

/// Render the tree as an indented listing, one node per line.
pub fn render_listing(tree: &SearchTree) -> String {
    let mut out = String::new();
    let pruning = match tree.pruning {
        Pruning::On => "on",
        Pruning::Off => "off",
    };
    let best = tree.best.map_or_else(|| "none".to_string(), |p| p.to_string());
    let _ = writeln!(
        out,
        "# {} to move, {} completed plies, budget {}, pruning {pruning}, {} nodes, best {best}",
        tree.side,
        tree.depth,
        describe_budget(tree.budget),
        tree.len(),
    );
    for (_, node) in tree.walk() {
        let indent = "  ".repeat(node.ply as usize);
        let marker = if node.ply == 1 && node.mv.is_some() && node.mv == tree.best {
            " *"
        } else {
            ""
        };
        let _ = writeln!(out, "{indent}{}{marker}", node_label(node));
    }
    out
}

/// Render the tree as a Graphviz digraph. Pruned nodes are dashed and the
/// chosen root move is bold.
pub fn render_dot(tree: &SearchTree) -> String {
    let mut out = String::from("digraph search {\n  node [shape=box];\n");
    for (id, node) in tree.walk() {
        let mut attrs = format!("label=\"{}\"", node_label(node));
        if node.pruned {
            attrs.push_str(", style=dashed");
        } else if node.ply == 1 && node.mv.is_some() && node.mv == tree.best {
            attrs.push_str(", style=bold");
        }
        let _ = writeln!(out, "  n{id} [{attrs}];");
        if let Some(parent) = node.parent {
            let _ = writeln!(out, "  n{parent} -> n{id};");
        }
    }
    out.push_str("}\n");
    out
}

/// Holds the tree of the most recent search and writes it out on request.
#[derive(Debug, Default)]
pub struct TreeExporter {
    last: Option<SearchTree>,
}

impl TreeExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored tree. `None` clears it.
    pub fn record(&mut self, tree: Option<SearchTree>) {
        self.last = tree;
    }

    pub fn last(&self) -> Option<&SearchTree> {
        self.last.as_ref()
    }

    /// Write the stored tree to `path`, choosing the format from its
    /// extension.
    pub fn export(&self, path: &Path) -> Result<(), ExportError> {
        let tree = self.last.as_ref().ok_or(ExportError::NoSearch)?;
        let text = match TreeFormat::for_path(path) {
            TreeFormat::Listing => render_listing(tree),
            TreeFormat::Dot => render_dot(tree),
        };
        fs::write(path, text).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("exported {} search nodes to {}", tree.len(), path.display());
        Ok(())
    }
}
