use crate::ai::config::{Budget, Pruning};
use crate::game::{Pos, Side};

/// One node of a recorded search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// The move leading here; `None` for the root.
    pub mv: Option<Pos>,
    /// The side that played `mv`.
    pub side: Option<Side>,
    pub ply: u32,
    /// Evaluated or backed-up value from the searching side's view. `None`
    /// for pruned nodes.
    pub value: Option<f64>,
    pub pruned: bool,
}

/// Shape of one completed search, rooted at the searched position.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTree {
    pub side: Side,
    pub depth: u32,
    pub pruning: Pruning,
    pub budget: Budget,
    pub best: Option<Pos>,
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub const ROOT: usize = 0;

    pub fn new(side: Side, depth: u32, pruning: Pruning, budget: Budget) -> Self {
        SearchTree {
            side,
            depth,
            pruning,
            budget,
            best: None,
            nodes: vec![SearchNode {
                parent: None,
                children: Vec::new(),
                mv: None,
                side: None,
                ply: 0,
                value: None,
                pruned: false,
            }],
        }
    }

    /// Add a child under `parent` and return its id.
    pub fn add_child(&mut self, parent: usize, mv: Pos, side: Side, ply: u32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            parent: Some(parent),
            children: Vec::new(),
            mv: Some(mv),
            side: Some(side),
            ply,
            value: None,
            pruned: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Record a sibling move that was cut off without being explored.
    pub fn add_pruned(&mut self, parent: usize, mv: Pos, side: Side, ply: u32) {
        let id = self.add_child(parent, mv, side, ply);
        self.nodes[id].pruned = true;
    }

    pub fn set_value(&mut self, id: usize, value: f64) {
        self.nodes[id].value = Some(value);
    }

    pub fn node(&self, id: usize) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &SearchNode {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn pruned_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.pruned).count()
    }

    /// Depth-first pre-order walk yielding (id, node).
    pub fn walk(&self) -> Vec<(usize, &SearchNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            out.push((id, node));
            stack.extend(node.children.iter().rev());
        }
        out
    }
}
