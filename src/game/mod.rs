mod board;
mod direction;
mod error;
mod position;
mod snake;
pub use self::board::{Board, Cell};
pub use self::direction::Direction;
pub use self::error::{GameOverError, SizeError};
pub use self::position::Position;
use self::snake::Snake;
use log::{debug, info, trace};
use rand::{seq::IteratorRandom, Rng};
use std::collections::VecDeque;

/// Number of cells in the snake at the start of a game
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Maximum number of direction changes that can be waiting to be applied
pub const MAX_QUEUED_TURNS: usize = 2;

/// Narrowest board that can hold the starting snake, which occupies columns 1
/// through 3
pub const MIN_COLUMNS: u16 = 4;

/// Column of the snake's head at the start of a game
const START_COLUMN: i32 = 3;

/// Direction the snake faces at the start of a game
const START_DIRECTION: Direction = Direction::Right;

/// The rules state of a game of Snake.
///
/// The only mutators are [`GameState::change_direction()`], called whenever
/// the player asks to turn, and [`GameState::advance()`], called once per
/// tick.  Everything else is read-only access for drawing the game.
///
/// Between calls, a board cell is [`Cell::Snake`] if & only if its position
/// is in the snake's body, and exactly one cell is [`Cell::Food`] unless the
/// board has no empty cells left.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState<R = rand::rngs::ThreadRng> {
    rng: R,
    board: Board,
    snake: Snake,

    /// The direction applied on the most recent tick
    direction: Direction,

    /// Direction changes not yet applied, oldest first
    turns: VecDeque<Direction>,

    score: u32,
    food: Option<Position>,
    phase: Phase,
}

impl GameState<rand::rngs::ThreadRng> {
    /// Start a new game on a board of the given size, placing food with the
    /// thread-local RNG
    ///
    /// # Errors
    ///
    /// Returns `Err` if `rows` is zero or `columns` is less than
    /// [`MIN_COLUMNS`].
    pub fn new(rows: u16, columns: u16) -> Result<Self, SizeError> {
        GameState::new_with_rng(rows, columns, rand::rng())
    }
}

impl<R: Rng> GameState<R> {
    /// Start a new game on a board of the given size, placing food with
    /// `rng`.
    ///
    /// The snake starts as three cells in the middle row, in columns 1
    /// through 3 with its head in column 3, facing right.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `rows` is zero or `columns` is less than
    /// [`MIN_COLUMNS`].
    pub fn new_with_rng(rows: u16, columns: u16, rng: R) -> Result<GameState<R>, SizeError> {
        if rows == 0 {
            return Err(SizeError::NoRows);
        }
        if columns < MIN_COLUMNS {
            return Err(SizeError::TooNarrow { columns });
        }
        let mut board = Board::new(rows, columns);
        let head = Position::new(i32::from(rows / 2), START_COLUMN);
        let snake = Snake::new(head, START_DIRECTION, INITIAL_SNAKE_LENGTH);
        for pos in snake.cells() {
            board.set(pos, Cell::Snake);
        }
        let mut game = GameState {
            rng,
            board,
            snake,
            direction: START_DIRECTION,
            turns: VecDeque::with_capacity(MAX_QUEUED_TURNS),
            score: 0,
            food: None,
            phase: Phase::Playing,
        };
        game.place_food();
        debug!("Started {rows}x{columns} game with snake head at {head}");
        Ok(game)
    }

    /// Advance the game by one tick.
    ///
    /// The oldest queued direction change, if any, is applied first.  The
    /// snake then moves one cell: onto an empty cell it keeps its length;
    /// onto food it grows by one cell, the score goes up by one, and new food
    /// is placed.  Running into a wall or into itself ends the game and
    /// leaves the board untouched.
    ///
    /// Moving into the cell currently occupied by the tail is allowed, as the
    /// tail vacates that cell on the same tick.
    ///
    /// # Errors
    ///
    /// Returns `Err` without changing anything if the game is already over.
    pub fn advance(&mut self) -> Result<Outcome, GameOverError> {
        if self.game_over() {
            return Err(GameOverError);
        }
        if let Some(direction) = self.turns.pop_front() {
            self.direction = direction;
        }
        let new_head = self.snake.head().translate(self.direction);
        let outcome = match self.will_hit(new_head) {
            Cell::Empty => {
                self.remove_tail();
                self.add_head(new_head);
                Outcome::Moved
            }
            Cell::Food => {
                self.add_head(new_head);
                self.score = self.score.saturating_add(1);
                self.place_food();
                Outcome::Ate
            }
            cell @ (Cell::Snake | Cell::Outside) => {
                let collision = Collision {
                    position: new_head,
                    cell,
                };
                self.phase = Phase::Over(collision);
                info!(
                    "Game over: snake hit {cell:?} at {new_head}; final score {}",
                    self.score
                );
                Outcome::Crashed(collision)
            }
        };
        Ok(outcome)
    }

    /// Place food on an empty cell chosen uniformly at random.  If there are
    /// no empty cells, no food is placed.
    fn place_food(&mut self) {
        self.food = self.board.empty_positions().choose(&mut self.rng);
        if let Some(pos) = self.food {
            self.board.set(pos, Cell::Food);
            debug!("Placed food at {pos}");
        } else {
            debug!("No empty cells left; not placing food");
        }
    }
}

impl<R> GameState<R> {
    /// Ask for the snake to turn to face `direction`.
    ///
    /// The change is queued and applied on a later tick.  It is silently
    /// ignored if [`MAX_QUEUED_TURNS`] changes are already waiting, if
    /// `direction` is the same as or opposite to the most recently queued
    /// direction (or the current direction if none are queued), or if the
    /// game is over.  Returns `true` if the change was queued.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.game_over() || !self.can_change_direction(direction) {
            trace!("Ignoring turn to {direction:?}");
            return false;
        }
        self.turns.push_back(direction);
        debug!("Queued turn to {direction:?}");
        true
    }

    pub fn rows(&self) -> u16 {
        self.board.rows()
    }

    pub fn columns(&self) -> u16 {
        self.board.columns()
    }

    /// Return the board's cell markers
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    /// Return where & into what the snake crashed, if the game is over
    pub fn collision(&self) -> Option<Collision> {
        match self.phase {
            Phase::Playing => None,
            Phase::Over(collision) => Some(collision),
        }
    }

    /// Return the direction the snake moved in on the most recent tick (or
    /// will move in on the first tick)
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the direction changes waiting to be applied, oldest first
    pub fn queued_turns(&self) -> impl ExactSizeIterator<Item = Direction> + '_ {
        self.turns.iter().copied()
    }

    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn tail_position(&self) -> Position {
        self.snake.tail()
    }

    /// Return the positions of the snake's cells, from head to tail
    pub fn snake_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.cells()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Return the position of the food, or `None` if the board is full
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    fn last_direction(&self) -> Direction {
        self.turns.back().copied().unwrap_or(self.direction)
    }

    fn can_change_direction(&self, direction: Direction) -> bool {
        if self.turns.len() >= MAX_QUEUED_TURNS {
            return false;
        }
        let last = self.last_direction();
        direction != last && direction != last.opposite()
    }

    /// Classify the cell the head is about to move into
    fn will_hit(&self, new_head: Position) -> Cell {
        if !self.board.contains(new_head) {
            Cell::Outside
        } else if new_head == self.snake.tail() {
            // The tail's cell is still marked as snake but will be vacated
            // this tick.
            Cell::Empty
        } else {
            self.board.get(new_head)
        }
    }

    fn add_head(&mut self, pos: Position) {
        self.snake.push_head(pos);
        self.board.set(pos, Cell::Snake);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.pop_tail() {
            self.board.set(tail, Cell::Empty);
        }
    }
}

/// What happened on a tick
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// The snake moved onto an empty cell
    Moved,

    /// The snake moved onto the food and grew
    Ate,

    /// The snake ran into a wall or itself, ending the game
    Crashed(Collision),
}

/// The position the snake's head tried to move into when the game ended,
/// along with what was there: [`Cell::Outside`] for a wall or
/// [`Cell::Snake`] for the snake's own body
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Collision {
    pub position: Position,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Playing,
    Over(Collision),
}
