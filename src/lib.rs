pub mod algorithm;
pub mod components;
pub mod error;
pub mod graph;
pub mod grid;
pub mod input;
pub mod path;
pub mod state;

pub use algorithm::Adjacency;
pub use components::{find_components, Component};
pub use error::{Error, InvalidGrid, Result};
pub use graph::{Graph, Style};
pub use grid::{Cell, Grid, WATER};
pub use state::State;
