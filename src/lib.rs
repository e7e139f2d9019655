//! Rules engine for grid-based Snake.
//!
//! A [`GameState`] tracks the snake's body on a fixed-size [`Board`], the food,
//! the queue of pending direction changes, the score, and whether the game is
//! over.  A driver calls [`GameState::change_direction()`] whenever the player
//! asks to turn and [`GameState::advance()`] once per tick, then reads the
//! board, score, and game-over flag back out to draw them.
mod game;
pub use crate::game::{
    Board, Cell, Collision, Direction, GameOverError, GameState, Outcome, Position, SizeError,
    INITIAL_SNAKE_LENGTH, MAX_QUEUED_TURNS, MIN_COLUMNS,
};
