use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::config::{AppConfig, PlayersConfig};
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, COLS};

pub struct App {
    game: GameState,
    players: PlayersConfig,
    tick_rate: Duration,
    start_column: usize,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            game: GameState::new(),
            players: config.players.clone(),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
            start_column: config.ui.start_column,
            selected_column: config.ui.start_column,
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
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
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.game.reset();
                self.selected_column = self.start_column;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game.drop_token(self.selected_column) {
            Ok(result) => {
                self.message = match result.outcome {
                    GameOutcome::Winner { player, .. } => {
                        Some(format!("{} wins!", self.players.label(player)))
                    }
                    GameOutcome::Draw => Some("It's a draw!".to_string()),
                    GameOutcome::InProgress => None,
                };
            }
            Err(MoveError::ColumnFull(col)) => {
                debug!(col, "drop ignored: column full");
                self.message = Some(format!("Column {} is full!", col + 1));
            }
            Err(MoveError::InvalidColumn(col)) => {
                debug!(col, "drop ignored: invalid column");
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameAlreadyOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game.snapshot(),
            &self.game.legal_columns(),
            self.selected_column,
            self.message.as_deref(),
            &self.players,
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Player, Position};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = App::default();
        assert_eq!(app.selected_column(), 3);

        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);

        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), COLS - 1);
    }

    #[test]
    fn test_enter_drops_in_selected_column() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);

        let last = app.game().last_move().unwrap();
        assert_eq!(last.position, Position::new(5, 3));
        assert_eq!(last.player, Player::Red);
        assert_eq!(app.message(), None);
    }

    #[test]
    fn test_number_keys_drop_directly() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('7'));

        assert_eq!(app.selected_column(), 6);
        assert_eq!(app.game().board().get(5, 0), Some(Cell::Red));
        assert_eq!(app.game().board().get(5, 6), Some(Cell::Yellow));
    }

    #[test]
    fn test_win_message_uses_configured_label() {
        let mut config = AppConfig::default();
        config.players.red_label = "Alice".to_string();
        let mut app = App::new(&config);

        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key));
        }

        assert_eq!(app.message(), Some("Alice wins!"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));
    }

    #[test]
    fn test_full_column_message() {
        let mut app = App::default();
        for _ in 0..6 {
            press(&mut app, KeyCode::Enter);
        }
        let before = app.game().clone();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message(), Some("Column 4 is full!"));
        assert_eq!(app.game(), &before);
    }

    #[test]
    fn test_reset_key() {
        let mut app = App::default();
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));

        assert_eq!(app.game(), &GameState::new());
        assert_eq!(app.selected_column(), 3);
        assert_eq!(app.message(), Some("New game started!"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());

        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
