use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::prelude::*;
use std::iter::Copied;
use std::slice;
use std::str::FromStr;

use bstr::io::BufReadExt;
use bstr::{BString, ByteSlice};
use fxhash::FxHashMap;
use gfa::gfa::Line;
use gfa::parser::GFAParser;
use log::debug;

use crate::algorithm::{self, Adjacency};
use crate::error::{Error, Result};
use crate::state::State;

pub type NodeIx = usize;
pub type AdjacencyList = Vec<NodeIx>;
pub type BTreeGraph = BTreeMap<NodeIx, AdjacencyList>;

/// How an edge `(a, b)` is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// `b` is appended to `a`'s neighbours only.
    #[default]
    Directed,
    /// `b` is appended to `a`'s neighbours and `a` to `b`'s.
    Undirected,
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "directed" => Ok(Style::Directed),
            "undirected" => Ok(Style::Undirected),
            other => Err(format!("unknown graph style '{}'", other)),
        }
    }
}

/// An adjacency list graph over arbitrary node identifiers.
///
/// Identifiers are interned into indices in the order they are first
/// seen, so iterating the adjacency map (or [`Graph::nodes`]) yields
/// nodes in insertion order. Neighbour lists keep insertion order and
/// duplicates. Every node that appears as a neighbour has its own
/// entry. The graph is not modified after construction.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    graph: BTreeGraph,
    inv_names: Vec<N>,
    name_map: FxHashMap<N, NodeIx>,
    style: Style,
}

impl<N: Clone + Eq + Hash> Graph<N> {
    fn empty(style: Style) -> Graph<N> {
        Graph {
            graph: BTreeMap::new(),
            inv_names: Vec::new(),
            name_map: FxHashMap::default(),
            style,
        }
    }

    fn get_ix(&mut self, name: N) -> NodeIx {
        if let Some(ix) = self.name_map.get(&name) {
            *ix
        } else {
            let ix = self.inv_names.len();
            self.name_map.insert(name.clone(), ix);
            self.inv_names.push(name);
            self.graph.insert(ix, Vec::new());
            ix
        }
    }

    fn push_edge(&mut self, from: N, to: N) {
        let from_ix = self.get_ix(from);
        let to_ix = self.get_ix(to);

        self.graph.entry(from_ix).or_default().push(to_ix);
        if self.style == Style::Undirected {
            self.graph.entry(to_ix).or_default().push(from_ix);
        }
    }

    /// Builds the adjacency list from `(source, destination)` pairs.
    /// Undirected self-loops put the node in its own neighbour list.
    pub fn from_edges<I>(edges: I, style: Style) -> Graph<N>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::empty(style);
        for (from, to) in edges {
            graph.push_edge(from, to);
        }
        debug!(
            "built {:?} graph: {} nodes, {} adjacency entries",
            style,
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    pub fn build_directed<I>(edges: I) -> Graph<N>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        Self::from_edges(edges, Style::Directed)
    }

    pub fn build_undirected<I>(edges: I) -> Graph<N>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        Self::from_edges(edges, Style::Undirected)
    }

    /// Like [`Graph::from_edges`], for edges given as endpoint
    /// sequences. Fails with [`Error::MalformedEdge`] on the first entry
    /// that does not hold exactly two endpoints; no graph is produced.
    pub fn try_from_edge_lists<I, E>(
        edges: I,
        style: Style,
    ) -> Result<Graph<N>>
    where
        I: IntoIterator<Item = E>,
        E: IntoIterator<Item = N>,
    {
        let pairs = edges
            .into_iter()
            .enumerate()
            .map(|(index, edge)| {
                let mut endpoints = edge.into_iter();
                match (endpoints.next(), endpoints.next(), endpoints.next()) {
                    (Some(from), Some(to), None) => Ok((from, to)),
                    (a, b, c) => {
                        let seen = [a.is_some(), b.is_some(), c.is_some()];
                        let len = seen.iter().filter(|&&s| s).count()
                            + endpoints.count();
                        Err(Error::MalformedEdge { index, len })
                    }
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_edges(pairs, style))
    }

    /// Takes a pre-built mapping from node to neighbours. Keys keep
    /// their given order; neighbours that never appear as keys are
    /// appended after them with empty neighbour lists. A repeated key
    /// extends the earlier entry.
    ///
    /// The graph is recorded as [`Style::Directed`] since the mapping is
    /// used exactly as given.
    pub fn from_adjacency<I, V>(mapping: I) -> Graph<N>
    where
        I: IntoIterator<Item = (N, V)>,
        V: IntoIterator<Item = N>,
    {
        let mut graph = Self::empty(Style::Directed);

        let entries: Vec<(NodeIx, V)> = mapping
            .into_iter()
            .map(|(node, neighbors)| (graph.get_ix(node), neighbors))
            .collect();

        for (ix, neighbors) in entries {
            for neighbor in neighbors {
                let to_ix = graph.get_ix(neighbor);
                graph.graph.entry(ix).or_default().push(to_ix);
            }
        }
        debug!(
            "adopted adjacency mapping: {} nodes, {} adjacency entries",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Nodes in insertion order. Component discovery follows this order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.inv_names.iter()
    }

    pub fn node_count(&self) -> usize {
        self.inv_names.len()
    }

    /// Total length of all neighbour lists; an undirected edge counts
    /// twice, an undirected self-loop counts twice in the same list.
    pub fn edge_count(&self) -> usize {
        self.graph.values().map(|v| v.len()).sum()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn contains(&self, node: &N) -> bool {
        self.name_map.contains_key(node)
    }

    /// Neighbours of `node` in insertion order, or `None` if the node is
    /// not in the graph.
    pub fn neighbors(&self, node: &N) -> Option<Vec<&N>> {
        let ix = self.index_of(node)?;
        Some(
            self.graph[&ix]
                .iter()
                .map(|&to| &self.inv_names[to])
                .collect(),
        )
    }

    /// The interned adjacency list.
    pub fn adjacency(&self) -> &BTreeGraph {
        &self.graph
    }

    pub fn index_of(&self, node: &N) -> Option<NodeIx> {
        self.name_map.get(node).copied()
    }

    pub fn name(&self, ix: NodeIx) -> Option<&N> {
        self.inv_names.get(ix)
    }

    pub(crate) fn names<I>(&self, ixs: I) -> Vec<N>
    where
        I: IntoIterator<Item = NodeIx>,
    {
        ixs.into_iter()
            .map(|ix| self.inv_names[ix].clone())
            .collect()
    }
}

impl<N: Clone + Eq + Hash + Debug> Graph<N> {
    pub(crate) fn start_ix(&self, node: &N) -> Result<NodeIx> {
        self.index_of(node).ok_or_else(|| Error::unknown_start(node))
    }

    fn traverse<F>(&self, start: &N, walk: F) -> Result<Vec<N>>
    where
        F: FnOnce(&Self, NodeIx, &mut State<NodeIx>),
    {
        let start = self.start_ix(start)?;
        let mut state = State::with_capacity(self.node_count());
        walk(self, start, &mut state);
        Ok(self.names(state.into_order()))
    }

    /// Stack-based depth-first order from `start`; see
    /// [`algorithm::depth_first_iterative`] for how it differs from
    /// [`Graph::depth_first_recursive`].
    pub fn depth_first(&self, start: &N) -> Result<Vec<N>> {
        self.traverse(start, algorithm::depth_first_iterative::<Self>)
    }

    pub fn depth_first_recursive(&self, start: &N) -> Result<Vec<N>> {
        self.traverse(start, algorithm::depth_first_recursive::<Self>)
    }

    pub fn breadth_first(&self, start: &N) -> Result<Vec<N>> {
        self.traverse(start, algorithm::breadth_first::<Self>)
    }
}

impl Graph<BString> {
    /// Constructs an undirected graph from the link lines of a GFA
    /// stream, parsing line-by-line and ignoring every other line type.
    /// Nodes are segment names. A link line that does not parse is a
    /// `MalformedEdge` carrying its 1-based line number.
    pub fn from_gfa_reader<T: BufRead>(
        reader: &mut T,
    ) -> Result<Graph<BString>> {
        let parser: GFAParser<Vec<u8>, ()> = GFAParser::new();
        let mut graph = Self::empty(Style::Undirected);

        for (ix, line) in reader.byte_lines().enumerate() {
            let line = line?;
            let is_link = line.split_str("\t").next() == Some(&b"L"[..]);
            match parser.parse_gfa_line(&line) {
                Ok(Line::Link(link)) => graph.push_edge(
                    BString::from(link.from_segment),
                    BString::from(link.to_segment),
                ),
                Err(_) if is_link => {
                    // segment names sit in the 2nd and 4th fields
                    let fields = line.split_str("\t").count();
                    let len = [1, 3].iter().filter(|&&f| f < fields).count();
                    return Err(Error::MalformedEdge { index: ix + 1, len });
                }
                _ => {}
            }
        }
        debug!(
            "read GFA links: {} segments, {} adjacency entries",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

impl<N> Adjacency for Graph<N> {
    type Node = NodeIx;
    type Neighbors<'a>
        = Copied<slice::Iter<'a, NodeIx>>
    where
        Self: 'a;

    fn contains(&self, node: NodeIx) -> bool {
        self.graph.contains_key(&node)
    }

    fn neighbors(&self, node: NodeIx) -> Self::Neighbors<'_> {
        self.graph
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }
}
