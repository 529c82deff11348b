use std::hash::Hash;

use fxhash::FxHashSet;

/// Working state of one logical traversal: the visited set and the
/// order in which nodes were first marked.
///
/// Every public query builds a fresh `State`. Walks that are handed the
/// same `State` share its visited set, which is how component
/// enumeration skips nodes already claimed by an earlier component.
/// Reusing a `State` across unrelated queries requires a `reset` first.
#[derive(Debug, Clone)]
pub struct State<N> {
    visited: FxHashSet<N>,
    order: Vec<N>,
}

impl<N> Default for State<N> {
    fn default() -> Self {
        State {
            visited: FxHashSet::default(),
            order: Vec::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> State<N> {
    pub fn new() -> State<N> {
        Self::default()
    }

    pub fn with_capacity(num_nodes: usize) -> State<N> {
        let mut visited = FxHashSet::default();
        visited.reserve(num_nodes);
        State {
            visited,
            order: Vec::with_capacity(num_nodes),
        }
    }

    /// Marks `node` visited. Returns false if it already was.
    pub fn mark(&mut self, node: N) -> bool {
        if self.visited.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    pub fn is_visited(&self, node: N) -> bool {
        self.visited.contains(&node)
    }

    /// Nodes in the order they were marked.
    pub fn order(&self) -> &[N] {
        &self.order
    }

    pub fn into_order(self) -> Vec<N> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn reset(&mut self) {
        self.visited.clear();
        self.order.clear();
    }
}
