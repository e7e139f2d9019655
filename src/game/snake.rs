use super::direction::Direction;
use super::position::Position;
use std::collections::VecDeque;

/// The cells occupied by the snake
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of the rest of the snake's cells, from the cell behind
    /// the head to the tail
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a snake of `len` cells (at least one) with its head at `head`,
    /// trailing behind it in the direction opposite to `facing`
    pub(super) fn new(head: Position, facing: Direction, len: usize) -> Snake {
        let back = facing.opposite();
        let body = std::iter::successors(Some(head.translate(back)), |&p| Some(p.translate(back)))
            .take(len.saturating_sub(1))
            .collect();
        Snake { head, body }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the position of the snake's tail.  For a one-cell snake, this
    /// is the head.
    pub(super) fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Iterate over the positions of the snake's cells, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Move the head to `pos`, keeping the old head as part of the body
    pub(super) fn push_head(&mut self, pos: Position) {
        self.body.push_front(self.head);
        self.head = pos;
    }

    /// Remove and return the tail cell.  A one-cell snake has no tail to
    /// remove.
    pub(super) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}

#[cfg(test)]
impl FromIterator<Position> for Snake {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Snake {
        let mut iter = iter.into_iter();
        let head = iter.next().expect("snake should have at least one cell");
        Snake {
            head,
            body: iter.collect(),
        }
    }
}
