use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::ControlFlow;

use log::trace;

use crate::state::State;

/// Neighbour lookup shared by every traversal. Implemented by
/// [`Graph`](crate::Graph) over interned node indices and by
/// [`Grid`](crate::Grid) over cells.
pub trait Adjacency {
    type Node: Copy + Eq + Hash + Debug;
    type Neighbors<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    /// Whether `node` may be entered at all. Nodes failing this test are
    /// skipped without being marked visited.
    fn contains(&self, node: Self::Node) -> bool;

    /// Neighbours of `node`, in adjacency order.
    fn neighbors(&self, node: Self::Node) -> Self::Neighbors<'_>;
}

/// Frames of the explicit depth-first stack. `Scan` holds the
/// remaining neighbours of a node that has already been entered.
enum Inst<'a, A: Adjacency + 'a> {
    Enter(A::Node),
    Scan(A::Neighbors<'a>),
}

type InstStack<'a, A> = VecDeque<Inst<'a, A>>;

fn run_inst<'a, A, F>(
    inst: Inst<'a, A>,
    stack: &mut InstStack<'a, A>,
    state: &mut State<A::Node>,
    adj: &'a A,
    on_enter: &mut F,
) -> ControlFlow<()>
where
    A: Adjacency,
    F: FnMut(A::Node) -> ControlFlow<()>,
{
    match inst {
        Inst::Enter(w) => {
            if !adj.contains(w) || !state.mark(w) {
                return ControlFlow::Continue(());
            }
            trace!("enter {:?}", w);
            if on_enter(w).is_break() {
                return ControlFlow::Break(());
            }
            stack.push_front(Inst::Scan(adj.neighbors(w)));
        }
        Inst::Scan(mut rest) => {
            if let Some(u) = rest.next() {
                stack.push_front(Inst::Scan(rest));
                stack.push_front(Inst::Enter(u));
            }
        }
    }
    ControlFlow::Continue(())
}

/// Depth-first walk with the visiting order of the classic recursive
/// formulation (mark, then descend into each neighbour in adjacency
/// order), driven by an explicit stack so depth is not limited by the
/// call stack.
///
/// `on_enter` is called once per newly marked node and can stop the walk
/// early by returning `Break`, in which case `Break` is returned.
pub fn walk_depth_first<A, F>(
    adj: &A,
    start: A::Node,
    state: &mut State<A::Node>,
    mut on_enter: F,
) -> ControlFlow<()>
where
    A: Adjacency,
    F: FnMut(A::Node) -> ControlFlow<()>,
{
    let mut stack: InstStack<'_, A> = VecDeque::new();
    stack.push_front(Inst::Enter(start));

    while let Some(inst) = stack.pop_front() {
        if run_inst(inst, &mut stack, state, adj, &mut on_enter).is_break() {
            return ControlFlow::Break(());
        }
    }
    ControlFlow::Continue(())
}

pub fn depth_first_recursive<A: Adjacency>(
    adj: &A,
    start: A::Node,
    state: &mut State<A::Node>,
) {
    let _ = walk_depth_first(adj, start, state, |_| ControlFlow::Continue(()));
}

/// Stack-based depth-first walk: pop a node, and if it is unvisited mark
/// it and push all of its neighbours. A node can be pushed several times
/// before it is first popped; later copies are dropped on pop. The
/// resulting order generally differs from [`depth_first_recursive`],
/// since the last neighbour pushed is the first one visited.
pub fn depth_first_iterative<A: Adjacency>(
    adj: &A,
    start: A::Node,
    state: &mut State<A::Node>,
) {
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if !adj.contains(node) || !state.mark(node) {
            continue;
        }
        trace!("dfs pop {:?}", node);
        stack.extend(adj.neighbors(node));
    }
}

/// Queue-based walk with the same enqueue-then-filter handling of
/// duplicates as [`depth_first_iterative`].
pub fn breadth_first<A: Adjacency>(
    adj: &A,
    start: A::Node,
    state: &mut State<A::Node>,
) {
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        if !adj.contains(node) || !state.mark(node) {
            continue;
        }
        trace!("bfs pop {:?}", node);
        queue.extend(adj.neighbors(node));
    }
}

/// Collects every node reachable from `start` that `state` has not seen
/// yet, in depth-first preorder. Returns an empty vector if `start` was
/// already visited (or cannot be entered), which is what lets repeated
/// calls with a shared `state` partition the nodes.
pub fn explore<A: Adjacency>(
    adj: &A,
    start: A::Node,
    state: &mut State<A::Node>,
) -> Vec<A::Node> {
    let mut found = Vec::new();
    let _ = walk_depth_first(adj, start, state, |node| {
        found.push(node);
        ControlFlow::Continue(())
    });
    found
}
