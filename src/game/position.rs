use super::direction::Direction;
use std::fmt;

/// A cell coordinate on the board.
///
/// Coordinates are signed so that translating a position off the edge of the
/// board still yields a value; whether it lies on the board is decided by
/// [`Board`][super::Board].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Position {
        Position { row, column }
    }

    /// Return the position one cell away in `direction`
    pub fn translate(self, direction: Direction) -> Position {
        let (dr, dc) = direction.offset();
        Position {
            row: self.row + dr,
            column: self.column + dc,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
