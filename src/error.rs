use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a grid was rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGrid {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    /// An edge entry did not hold exactly two endpoints. `index` is the
    /// position of the entry (or the line number, for text input).
    #[error("edge {index} has {len} endpoints, expected 2")]
    MalformedEdge { index: usize, len: usize },

    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] InvalidGrid),

    /// The start (or source) node of a query is not part of the graph.
    #[error("start node {0} is not in the graph")]
    UnknownStartNode(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn unknown_start<N: std::fmt::Debug>(node: &N) -> Self {
        Error::UnknownStartNode(format!("{:?}", node))
    }
}
