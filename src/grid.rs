use std::fmt;

use log::debug;

use crate::algorithm::{self, Adjacency};
use crate::error::{Error, InvalidGrid, Result};
use crate::state::State;

/// Label of a water cell in the classic islands layout.
pub const WATER: char = 'w';

/// A grid position. Grid cells are the nodes of a [`Grid`]; the type is
/// deliberately distinct from any identifier used by a
/// [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell { row, col }
    }
}

type BlockedFn<L> = Box<dyn Fn(&L) -> bool + Send + Sync>;

/// A rectangular array of cell labels read as an implicit graph: every
/// in-bounds cell that is not blocked is a node, adjacent to its up to
/// four orthogonal neighbours.
pub struct Grid<L> {
    cells: Vec<L>,
    rows: usize,
    cols: usize,
    blocked: BlockedFn<L>,
}

impl<L> fmt::Debug for Grid<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

impl<L: PartialEq + Send + Sync + 'static> Grid<L> {
    /// Builds a grid where cells labelled `blocked` are excluded.
    pub fn new(rows: Vec<Vec<L>>, blocked: L) -> Result<Grid<L>> {
        Self::with_predicate(rows, move |label| *label == blocked)
    }
}

impl<L> Grid<L> {
    /// Builds a grid where cells whose label satisfies `blocked` are
    /// excluded. Fails if the grid is empty or its rows differ in length.
    pub fn with_predicate<F>(rows: Vec<Vec<L>>, blocked: F) -> Result<Grid<L>>
    where
        F: Fn(&L) -> bool + Send + Sync + 'static,
    {
        let num_rows = rows.len();
        let num_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if num_cols == 0 {
            return Err(InvalidGrid::Empty.into());
        }

        let mut cells = Vec::with_capacity(num_rows * num_cols);
        for (row, labels) in rows.into_iter().enumerate() {
            if labels.len() != num_cols {
                return Err(InvalidGrid::Ragged {
                    row,
                    expected: num_cols,
                    found: labels.len(),
                }
                .into());
            }
            cells.extend(labels);
        }
        debug!("built {}x{} grid", num_rows, num_cols);

        Ok(Grid {
            cells,
            rows: num_rows,
            cols: num_cols,
            blocked: Box::new(blocked),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn label(&self, cell: Cell) -> Option<&L> {
        if self.in_bounds(cell) {
            self.cells.get(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    /// True for in-bounds cells whose label is excluded.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.label(cell).is_some_and(|label| (self.blocked)(label))
    }

    /// True for in-bounds cells that are not blocked.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.label(cell).is_some_and(|label| !(self.blocked)(label))
    }

    /// The in-bounds orthogonal neighbours of `cell`, in the order up,
    /// down, left, right. Blocked neighbours are included.
    pub fn neighbors(&self, cell: Cell) -> CellNeighbors {
        CellNeighbors {
            cell,
            rows: self.rows,
            cols: self.cols,
            step: 0,
        }
    }

    /// Open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, label)| !(self.blocked)(label))
            .map(move |(ix, _)| Cell::new(ix / cols, ix % cols))
    }

    pub(crate) fn start_cell(&self, cell: Cell) -> Result<Cell> {
        if self.in_bounds(cell) {
            Ok(cell)
        } else {
            Err(Error::unknown_start(&cell))
        }
    }

    fn traverse<F>(&self, start: Cell, walk: F) -> Result<Vec<Cell>>
    where
        F: FnOnce(&Self, Cell, &mut State<Cell>),
    {
        let start = self.start_cell(start)?;
        let mut state = State::new();
        walk(self, start, &mut state);
        Ok(state.into_order())
    }

    /// Stack-based depth-first order from `start`. A blocked start yields
    /// an empty order; a start outside the grid is an error.
    pub fn depth_first(&self, start: Cell) -> Result<Vec<Cell>> {
        self.traverse(start, algorithm::depth_first_iterative::<Self>)
    }

    pub fn depth_first_recursive(&self, start: Cell) -> Result<Vec<Cell>> {
        self.traverse(start, algorithm::depth_first_recursive::<Self>)
    }

    pub fn breadth_first(&self, start: Cell) -> Result<Vec<Cell>> {
        self.traverse(start, algorithm::breadth_first::<Self>)
    }
}

/// In-bounds orthogonal neighbours of a cell.
#[derive(Debug, Clone)]
pub struct CellNeighbors {
    cell: Cell,
    rows: usize,
    cols: usize,
    step: u8,
}

impl Iterator for CellNeighbors {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let Cell { row, col } = self.cell;
        while self.step < 4 {
            let step = self.step;
            self.step += 1;
            let next = match step {
                0 => row.checked_sub(1).map(|r| Cell::new(r, col)),
                1 => row.checked_add(1).map(|r| Cell::new(r, col)),
                2 => col.checked_sub(1).map(|c| Cell::new(row, c)),
                _ => col.checked_add(1).map(|c| Cell::new(row, c)),
            };
            let in_bounds = |c: &Cell| c.row < self.rows && c.col < self.cols;
            if let Some(next) = next.filter(in_bounds) {
                return Some(next);
            }
        }
        None
    }
}

/// Neighbours of a cell that are open for traversal.
pub struct OpenNeighbors<'a, L> {
    grid: &'a Grid<L>,
    inner: CellNeighbors,
}

impl<'a, L> Iterator for OpenNeighbors<'a, L> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let grid = self.grid;
        self.inner.find(|&cell| !grid.is_blocked(cell))
    }
}

impl<L> Adjacency for Grid<L> {
    type Node = Cell;
    type Neighbors<'a>
        = OpenNeighbors<'a, L>
    where
        Self: 'a;

    fn contains(&self, cell: Cell) -> bool {
        self.is_open(cell)
    }

    fn neighbors(&self, cell: Cell) -> Self::Neighbors<'_> {
        OpenNeighbors {
            grid: self,
            inner: Grid::neighbors(self, cell),
        }
    }
}
