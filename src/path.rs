use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::ControlFlow;

use fxhash::FxHashMap;
use log::{debug, trace};

use crate::algorithm::{walk_depth_first, Adjacency};
use crate::error::Result;
use crate::graph::Graph;
use crate::grid::{Cell, Grid};
use crate::state::State;

/// Depth-first reachability. `src == dst` holds immediately.
pub fn has_path<A: Adjacency>(adj: &A, src: A::Node, dst: A::Node) -> bool {
    if src == dst {
        return true;
    }
    let mut state = State::new();
    walk_depth_first(adj, src, &mut state, |node| {
        if node == dst {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}

/// Breadth-first reachability: true as soon as `dst` is dequeued, false
/// once the queue runs dry.
pub fn has_path_bfs<A: Adjacency>(adj: &A, src: A::Node, dst: A::Node) -> bool {
    let mut state = State::new();
    let mut queue = VecDeque::new();
    queue.push_back(src);

    while let Some(node) = queue.pop_front() {
        if node == dst {
            return true;
        }
        if adj.contains(node) && state.mark(node) {
            queue.extend(adj.neighbors(node));
        }
    }
    false
}

/// Breadth-first search that records, for every reached node, the node
/// it was reached from. Nodes are marked when enqueued, so each one is
/// enqueued at most once and its recorded distance is minimal.
///
/// Returns the hop count to `end` and the parent map, or `None` if `end`
/// is unreachable.
fn bfs_parents<A: Adjacency>(
    adj: &A,
    start: A::Node,
    end: A::Node,
) -> Option<(usize, FxHashMap<A::Node, A::Node>)> {
    if start == end {
        return Some((0, FxHashMap::default()));
    }
    if !adj.contains(start) {
        return None;
    }

    let mut state = State::new();
    let mut parents = FxHashMap::default();
    let mut queue: VecDeque<(A::Node, usize)> = VecDeque::new();

    state.mark(start);
    queue.push_back((start, 0));

    while let Some((node, distance)) = queue.pop_front() {
        trace!("bfs {:?} at distance {}", node, distance);
        if node == end {
            return Some((distance, parents));
        }
        for next in adj.neighbors(node) {
            if adj.contains(next) && state.mark(next) {
                parents.insert(next, node);
                queue.push_back((next, distance + 1));
            }
        }
    }
    None
}

/// Minimum number of hops from `start` to `end`, or `None` if `end` is
/// unreachable.
pub fn shortest_path<A: Adjacency>(
    adj: &A,
    start: A::Node,
    end: A::Node,
) -> Option<usize> {
    let distance = bfs_parents(adj, start, end).map(|(distance, _)| distance);
    debug!("shortest path {:?} -> {:?}: {:?}", start, end, distance);
    distance
}

/// One minimal path from `start` to `end`, both endpoints included.
pub fn shortest_path_nodes<A: Adjacency>(
    adj: &A,
    start: A::Node,
    end: A::Node,
) -> Option<Vec<A::Node>> {
    let (distance, parents) = bfs_parents(adj, start, end)?;

    let mut path = Vec::with_capacity(distance + 1);
    let mut current = end;
    path.push(current);
    while current != start {
        current = parents[&current];
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Path queries on named graphs. The source must be in the graph; a
/// destination that is not is simply unreachable.
impl<N: Clone + Eq + Hash + Debug> Graph<N> {
    pub fn has_path(&self, src: &N, dst: &N) -> Result<bool> {
        let src = self.start_ix(src)?;
        Ok(self
            .index_of(dst)
            .is_some_and(|dst| has_path(self, src, dst)))
    }

    pub fn has_path_bfs(&self, src: &N, dst: &N) -> Result<bool> {
        let src = self.start_ix(src)?;
        Ok(self
            .index_of(dst)
            .is_some_and(|dst| has_path_bfs(self, src, dst)))
    }

    pub fn shortest_path(&self, start: &N, end: &N) -> Result<Option<usize>> {
        let start = self.start_ix(start)?;
        Ok(self
            .index_of(end)
            .and_then(|end| shortest_path(self, start, end)))
    }

    pub fn shortest_path_nodes(
        &self,
        start: &N,
        end: &N,
    ) -> Result<Option<Vec<N>>> {
        let start = self.start_ix(start)?;
        Ok(self
            .index_of(end)
            .and_then(|end| shortest_path_nodes(self, start, end))
            .map(|path| self.names(path)))
    }
}

/// Path queries between grid cells. Blocked cells never lie on a path,
/// so a blocked source reaches nothing, not even itself.
impl<L> Grid<L> {
    /// The source cell if it is open, `None` if it is blocked.
    fn open_source(&self, src: Cell) -> Result<Option<Cell>> {
        let src = self.start_cell(src)?;
        Ok(Some(src).filter(|&cell| self.is_open(cell)))
    }

    pub fn has_path(&self, src: Cell, dst: Cell) -> Result<bool> {
        Ok(self
            .open_source(src)?
            .is_some_and(|src| has_path(self, src, dst)))
    }

    pub fn has_path_bfs(&self, src: Cell, dst: Cell) -> Result<bool> {
        Ok(self
            .open_source(src)?
            .is_some_and(|src| has_path_bfs(self, src, dst)))
    }

    pub fn shortest_path(
        &self,
        start: Cell,
        end: Cell,
    ) -> Result<Option<usize>> {
        Ok(self
            .open_source(start)?
            .and_then(|start| shortest_path(self, start, end)))
    }

    pub fn shortest_path_nodes(
        &self,
        start: Cell,
        end: Cell,
    ) -> Result<Option<Vec<Cell>>> {
        Ok(self
            .open_source(start)?
            .and_then(|start| shortest_path_nodes(self, start, end)))
    }
}
