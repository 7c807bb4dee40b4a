use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::game::{Board, BoardSettings, Color, GameOutcome, Position};

pub struct App {
    board: Board,
    active_color: Color,
    cursor: Position,
    upgrade_origin: Option<Position>,
    upgrade_candidates: Vec<Position>,
    outcome: Option<GameOutcome>,
    message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(settings: BoardSettings) -> Self {
        let center = (settings.size / 2) as i32;
        App {
            board: Board::new(settings),
            active_color: Color::Red,
            cursor: Position::new(center, center),
            upgrade_origin: None,
            upgrade_candidates: Vec::new(),
            outcome: None,
            message: None,
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select_cell();
            }
            KeyCode::Char('u') => {
                self.begin_manual_combine();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let limit = self.board.settings().size as i32 - 1;
        self.cursor = Position::new(
            (self.cursor.x + dx).clamp(0, limit),
            (self.cursor.y + dy).clamp(0, limit),
        );
    }

    /// Act on the selected cell: pick an upgrade target while a combine is
    /// pending, place a ring otherwise.
    fn select_cell(&mut self) {
        if self.outcome.is_some() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        if !self.upgrade_candidates.is_empty() {
            self.pick_upgrade_target();
        } else {
            self.place_ring();
        }
    }

    fn place_ring(&mut self) {
        match self.board.place_ring(self.cursor, self.active_color) {
            Ok(()) => {
                if self.board.settings().auto_upgrade {
                    let candidates = self.board.upgrade_positions(self.cursor);
                    if !candidates.is_empty() {
                        self.upgrade_origin = Some(self.cursor);
                        self.upgrade_candidates = candidates;
                        self.message =
                            Some("Combine! Pick a highlighted cell for the new piece.".to_string());
                        return;
                    }
                }
                self.finish_turn();
            }
            Err(_) => {
                self.message = Some(format!(
                    "{} cannot place a ring there.",
                    self.active_color.name()
                ));
            }
        }
    }

    fn pick_upgrade_target(&mut self) {
        if !self.upgrade_candidates.contains(&self.cursor) {
            self.message = Some("Pick one of the highlighted cells.".to_string());
            return;
        }
        let Some(origin) = self.upgrade_origin else {
            return;
        };

        match self.board.upgrade(origin, self.cursor) {
            Ok(()) => {
                if self.board.settings().auto_upgrade {
                    let next = self.board.upgrade_positions(self.cursor);
                    if !next.is_empty() {
                        self.upgrade_origin = Some(self.cursor);
                        self.upgrade_candidates = next;
                        self.message = Some(
                            "Combine again! Pick a highlighted cell for the new piece.".to_string(),
                        );
                        return;
                    }
                }
                self.clear_upgrade_state();
                self.finish_turn();
            }
            Err(err) => {
                self.clear_upgrade_state();
                self.message = Some(err.to_string());
            }
        }
    }

    /// Start a combine from the selected piece. Only meaningful when the
    /// auto-upgrade setting is off.
    fn begin_manual_combine(&mut self) {
        if self.outcome.is_some() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.board.settings().auto_upgrade {
            self.message = Some("Combines happen automatically after placement.".to_string());
            return;
        }
        if self.board.cell_at(self.cursor).color() != Some(self.active_color) {
            self.message = Some("Select one of your own pieces to combine.".to_string());
            return;
        }

        let candidates = self.board.upgrade_positions(self.cursor);
        if candidates.is_empty() {
            self.message = Some("No combinable run through this piece.".to_string());
            return;
        }
        self.upgrade_origin = Some(self.cursor);
        self.upgrade_candidates = candidates;
        self.message = Some("Pick a highlighted cell for the new piece.".to_string());
    }

    /// Recompute the win condition and hand the turn over while the game
    /// is still running.
    fn finish_turn(&mut self) {
        self.outcome = self.board.outcome();
        match self.outcome {
            Some(GameOutcome::Winner(winner)) => {
                self.message = Some(format!("{} wins!", winner.name()));
            }
            Some(GameOutcome::Draw) => {
                self.message = Some("It's a draw!".to_string());
            }
            None => {
                self.active_color = self.active_color.opposite();
            }
        }
    }

    fn clear_upgrade_state(&mut self) {
        self.upgrade_origin = None;
        self.upgrade_candidates.clear();
    }

    fn restart(&mut self) {
        let settings = self.board.settings().clone();
        let center = (settings.size / 2) as i32;
        self.board = Board::new(settings);
        self.active_color = Color::Red;
        self.cursor = Position::new(center, center);
        self.clear_upgrade_state();
        self.outcome = None;
        self.message = Some("New game started!".to_string());
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.board,
            self.active_color,
            self.cursor,
            &self.upgrade_candidates,
            self.outcome,
            &self.message,
        );
    }
}
