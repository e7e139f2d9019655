use super::position::Position;
use std::slice::Chunks;

/// The marker stored in (or reported for) a cell of the board
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,

    /// Reported for positions beyond the edges of the board.  Never stored.
    Outside,
}

/// A fixed-size grid of [`Cell`] markers, stored row-major.
///
/// Row 0 is the top row and column 0 is the leftmost column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    rows: u16,
    columns: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board
    pub(crate) fn new(rows: u16, columns: u16) -> Board {
        Board {
            rows,
            columns,
            cells: vec![Cell::Empty; usize::from(rows) * usize::from(columns)],
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Test whether `pos` lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Return the marker at `pos`, or [`Cell::Outside`] if `pos` is off the
    /// board
    pub fn get(&self, pos: Position) -> Cell {
        self.index(pos)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(Cell::Outside)
    }

    /// Mark the cell at `pos`.  Positions off the board are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert_ne!(cell, Cell::Outside, "Outside must not be stored in the board");
        debug_assert!(self.contains(pos), "{pos} is not on the board");
        if let Some(slot) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    /// Iterate over the rows of the board from top to bottom
    pub fn rows_iter(&self) -> Chunks<'_, Cell> {
        self.cells.chunks(usize::from(self.columns).max(1))
    }

    /// Iterate over every position on the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |r| {
            (0..columns).map(move |c| Position::new(i32::from(r), i32::from(c)))
        })
    }

    /// Iterate over the positions of all empty cells in row-major order
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&p| self.get(p) == Cell::Empty)
    }

    /// Return the number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let row = u16::try_from(pos.row).ok().filter(|&r| r < self.rows)?;
        let column = u16::try_from(pos.column)
            .ok()
            .filter(|&c| c < self.columns)?;
        Some(usize::from(row) * usize::from(self.columns) + usize::from(column))
    }
}
