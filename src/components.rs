//! Connected-component enumeration over graphs and grids.
//!
//! Components are discovered by calling [`explore`] on each root in
//! order with one shared [`State`]; a root already claimed by an earlier
//! component contributes nothing. For undirected graphs and grids the
//! result partitions the nodes. For directed graphs each component is
//! the set of nodes newly reachable from its root, so the result depends
//! on enumeration order and is neither weak nor strong connectivity.

use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::algorithm::{explore, Adjacency};
use crate::graph::Graph;
use crate::grid::{Cell, Grid};
use crate::state::State;

/// Nodes of one component, in depth-first discovery order.
pub type Component<N> = Vec<N>;

pub fn find_components<A, I>(adj: &A, roots: I) -> Vec<Component<A::Node>>
where
    A: Adjacency,
    I: IntoIterator<Item = A::Node>,
{
    let mut state = State::new();
    let mut components = Vec::new();

    for root in roots {
        let component = explore(adj, root, &mut state);
        if !component.is_empty() {
            components.push(component);
        }
    }
    debug!(
        "found {} components covering {} nodes",
        components.len(),
        state.len()
    );
    components
}

/// The first component of maximum size.
pub fn largest<N>(components: Vec<Component<N>>) -> Option<Component<N>> {
    components.into_iter().fold(None, |best, c| match best {
        Some(b) if b.len() >= c.len() => Some(b),
        _ => Some(c),
    })
}

/// The first component of minimum size.
pub fn smallest<N>(components: Vec<Component<N>>) -> Option<Component<N>> {
    components.into_iter().fold(None, |best, c| match best {
        Some(b) if b.len() <= c.len() => Some(b),
        _ => Some(c),
    })
}

impl<N: Clone + Eq + Hash + Debug> Graph<N> {
    /// Components seeded in node insertion order.
    pub fn components(&self) -> Vec<Component<N>> {
        find_components(self, self.adjacency().keys().copied())
            .into_iter()
            .map(|c| self.names(c))
            .collect()
    }

    pub fn connected_components_count(&self) -> usize {
        find_components(self, self.adjacency().keys().copied()).len()
    }

    /// `None` only for a graph without nodes.
    pub fn largest_component(&self) -> Option<Component<N>> {
        largest(self.components())
    }

    pub fn smallest_component(&self) -> Option<Component<N>> {
        smallest(self.components())
    }
}

impl<L> Grid<L> {
    /// Maximal 4-connected groups of open cells, seeded in row-major
    /// order.
    pub fn islands(&self) -> Vec<Component<Cell>> {
        find_components(self, self.open_cells())
    }

    pub fn number_of_islands(&self) -> usize {
        self.islands().len()
    }

    /// `None` when every cell is blocked.
    pub fn minimum_island(&self) -> Option<Component<Cell>> {
        smallest(self.islands())
    }

    pub fn largest_island(&self) -> Option<Component<Cell>> {
        largest(self.islands())
    }
}
