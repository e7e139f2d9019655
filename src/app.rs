use crate::command::Command;
use crate::config::Config;
use crate::view::GameView;
use crossterm::event::{poll, read, Event};
use gridsnake::{GameState, Outcome, SizeError};
use log::{debug, info, warn};
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// The terminal driver: ticks the game on a timer and turns key presses into
/// direction changes
#[derive(Clone, Debug)]
pub(crate) struct App {
    game: GameState,
    state: AppState,
    rows: u16,
    columns: u16,
    tick_period: Duration,
    next_tick: Option<Instant>,
}

impl App {
    pub(crate) fn new(config: &Config) -> Result<App, SizeError> {
        let game = GameState::new(config.rows, config.columns)?;
        Ok(App {
            game,
            state: AppState::Running,
            rows: config.rows,
            columns: config.columns,
            tick_period: config.tick_period(),
            next_tick: None,
        })
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(
            GameView {
                game: &self.game,
                paused: self.state == AppState::Paused,
            },
            frame.area(),
        );
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first.  While the game is paused or over, only input is waited for.
    fn process_input(&mut self) -> io::Result<()> {
        if self.ticking() {
            let period = self.tick_period;
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                self.next_tick = None;
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn tick(&mut self) {
        match self.game.advance() {
            Ok(Outcome::Ate) => debug!("Score is now {}", self.game.score()),
            Ok(Outcome::Crashed(collision)) => info!(
                "Crashed into {:?} at {}",
                collision.cell, collision.position
            ),
            Ok(Outcome::Moved) => (),
            // Unreachable while `ticking()` gates calls on the game being live
            Err(e) => debug!("{e}"),
        }
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.ticking() {
                self.state = AppState::Paused;
            }
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match (self.state, cmd) {
            (_, Command::Quit | Command::Q) => self.state = AppState::Quit,
            (AppState::Running, Command::Pause) if !self.game.game_over() => {
                self.state = AppState::Paused;
            }
            (AppState::Paused, Command::Pause) => {
                self.state = AppState::Running;
                self.next_tick = None;
            }
            (AppState::Running, Command::R) if self.game.game_over() => self.restart(),
            (AppState::Running, cmd) => {
                if let Some(direction) = cmd.direction() {
                    self.game.change_direction(direction);
                }
            }
            _ => (),
        }
    }

    fn restart(&mut self) {
        match GameState::new(self.rows, self.columns) {
            Ok(game) => {
                info!("Starting new game");
                self.game = game;
                self.next_tick = None;
            }
            Err(e) => warn!("Could not start new game: {e}"),
        }
    }

    fn ticking(&self) -> bool {
        self.state == AppState::Running && !self.game.game_over()
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Running,
    Paused,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use gridsnake::Direction;

    fn new_app() -> App {
        let config = Config {
            rows: 5,
            columns: 5,
            ..Config::default()
        };
        App::new(&config).expect("5x5 board should be valid")
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(code.into()));
    }

    #[test]
    fn too_narrow() {
        let config = Config {
            columns: 3,
            ..Config::default()
        };
        assert_eq!(
            App::new(&config).err(),
            Some(SizeError::TooNarrow { columns: 3 })
        );
    }

    #[test]
    fn arrows_queue_turns() {
        let mut app = new_app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Down);
        assert_eq!(
            app.game.queued_turns().collect::<Vec<_>>(),
            [Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn paused_ignores_turns() {
        let mut app = new_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Paused);
        assert!(!app.ticking());
        press(&mut app, KeyCode::Up);
        assert_eq!(app.game.queued_turns().len(), 0);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.state, AppState::Running);
        assert!(app.ticking());
    }

    #[test]
    fn focus_lost_pauses() {
        let mut app = new_app();
        app.handle_event(Event::FocusLost);
        assert_eq!(app.state, AppState::Paused);
    }

    #[test]
    fn quit() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quitting());
    }

    #[test]
    fn restart_after_game_over() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.game.game_over());
        press(&mut app, KeyCode::Up);
        // Up from the middle row of a 5x5 board reaches the top wall after
        // two moves and crashes on the third, whatever the food does
        for _ in 0..3 {
            app.tick();
        }
        assert!(app.game.game_over());
        assert!(!app.ticking());
        app.tick();
        assert!(app.game.game_over());
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.game.game_over());
        assert_eq!(app.game.score(), 0);
        assert_eq!(app.game.snake_len(), 3);
        assert!(app.ticking());
    }
}
