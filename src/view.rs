use crate::consts;
use crate::util::center_rect;
use gridsnake::{Cell, Direction, GameState, Position};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// A widget drawing a game: the score bar, the bordered board, and any
/// status messages below it
#[derive(Debug)]
pub(crate) struct GameView<'a, R> {
    pub(crate) game: &'a GameState<R>,
    pub(crate) paused: bool,
}

impl<R> Widget for GameView<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, board_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(format!(" Score: {}", self.game.score()), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);

        let block_size = Size {
            width: self.game.columns().saturating_add(2),
            height: self.game.rows().saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let board = self.game.board();
        for pos in board.positions() {
            match board.get(pos) {
                Cell::Snake => {
                    canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
                }
                Cell::Food => canvas.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
                Cell::Empty | Cell::Outside => (),
            }
        }
        // Draw the head last so that it replaces the body glyph
        if self.game.game_over() {
            canvas.draw_cell(
                self.game.head_position(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            canvas.draw_cell(
                self.game.head_position(),
                head_symbol(self.game.direction()),
                consts::SNAKE_STYLE,
            );
        }

        let messages = if self.game.game_over() {
            Some((" — GAME OVER —", "Restart", 'r'))
        } else if self.paused {
            Some((" — PAUSED —", "Resume", 'p'))
        } else {
            None
        };
        if let Some((title, action, key)) = messages {
            Span::from(title).render(msg1_area, buf);
            Line::from_iter([
                Span::raw(format!(" {action} (")),
                Span::styled(key.to_string(), consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        }
    }
}

/// Return the glyph to use for drawing the snake's head
fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// A region of a `Buffer` addressed by board position
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let (Ok(column), Ok(row)) = (u16::try_from(pos.column), u16::try_from(pos.row)) else {
            return;
        };
        let Some(x) = self.area.x.checked_add(column).filter(|&x| x < self.area.right()) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row).filter(|&y| y < self.area.bottom()) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A 1x4 board, on which the food can only go in the leftmost cell
    fn tiny_game() -> GameState<ChaCha12Rng> {
        GameState::new_with_rng(1, 4, ChaCha12Rng::seed_from_u64(RNG_SEED))
            .expect("1x4 board should be valid")
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    #[test]
    fn new_game() {
        let game = tiny_game();
        let area = Rect::new(0, 0, 10, 6);
        let mut buffer = Buffer::empty(area);
        GameView {
            game: &game,
            paused: false,
        }
        .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0 ",
            "  ┌────┐  ",
            "  │●⚬⚬<│  ",
            "  └────┘  ",
            "          ",
            "          ",
        ]);
        expected.set_style(Rect::new(0, 0, 10, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(3, 2, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(4, 2, 3, 1), consts::SNAKE_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn game_over() {
        let mut game = tiny_game();
        assert!(game.advance().is_ok());
        assert!(game.game_over());
        let area = Rect::new(0, 0, 30, 6);
        let mut buffer = Buffer::empty(area);
        GameView {
            game: &game,
            paused: false,
        }
        .render(area, &mut buffer);
        assert_eq!(row_text(&buffer, 0), " Score: 0");
        assert_eq!(row_text(&buffer, 2), "            │●⚬⚬×│");
        assert_eq!(buffer[(16, 2)].style().fg, consts::COLLISION_STYLE.fg);
        assert_eq!(row_text(&buffer, 4), " — GAME OVER —");
        assert_eq!(row_text(&buffer, 5), " Restart (r) — Quit (q)");
    }

    #[test]
    fn paused() {
        let game = tiny_game();
        let area = Rect::new(0, 0, 30, 6);
        let mut buffer = Buffer::empty(area);
        GameView {
            game: &game,
            paused: true,
        }
        .render(area, &mut buffer);
        assert_eq!(row_text(&buffer, 2), "            │●⚬⚬<│");
        assert_eq!(row_text(&buffer, 4), " — PAUSED —");
        assert_eq!(row_text(&buffer, 5), " Resume (p) — Quit (q)");
    }
}
