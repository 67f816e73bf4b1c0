use crate::config::PlayersConfig;
use crate::game::{GameOutcome, Player, Position, Snapshot, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    snapshot: &Snapshot,
    legal_columns: &[usize],
    selected_column: usize,
    message: Option<&str>,
    players: &PlayersConfig,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, snapshot, players, chunks[0]);
    render_board(frame, snapshot, legal_columns, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

/// Status line shown in the header for the given snapshot.
pub(crate) fn status_text(snapshot: &Snapshot, players: &PlayersConfig) -> String {
    match &snapshot.outcome {
        GameOutcome::InProgress => {
            format!("Current Player: {}", players.label(snapshot.current_player))
        }
        GameOutcome::Winner { player, .. } => format!("Winner: {}", players.label(*player)),
        GameOutcome::Draw => "Draw! Press R to play again".to_string(),
    }
}

fn render_header(frame: &mut Frame, snapshot: &Snapshot, players: &PlayersConfig, area: Rect) {
    let color = match &snapshot.outcome {
        GameOutcome::Draw => Color::Gray,
        GameOutcome::Winner { player, .. } => player_color(*player),
        GameOutcome::InProgress => player_color(snapshot.current_player),
    };

    let header = Paragraph::new(status_text(snapshot, players))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn cell_span(snapshot: &Snapshot, pos: Position) -> Span<'static> {
    let cell = snapshot.cells[pos.row][pos.col];
    let Some(player) = cell.player() else {
        return Span::styled(" . ", Style::default().fg(Color::DarkGray));
    };

    let mut style = Style::default().fg(player_color(player));
    let on_winning_line = snapshot
        .outcome
        .winning_line()
        .is_some_and(|line| line.contains(pos));
    if on_winning_line {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    } else if snapshot.last_move.is_some_and(|m| m.position == pos) {
        style = style.add_modifier(Modifier::BOLD);
        return Span::styled("(●)", style);
    }
    Span::styled(" ● ", style)
}

fn render_board(
    frame: &mut Frame,
    snapshot: &Snapshot,
    legal_columns: &[usize],
    selected_column: usize,
    area: Rect,
) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator; full columns are dimmed
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        let style = if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if legal_columns.contains(&col) {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        col_line.push(Span::styled(label, style));
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    // Top border
    lines.push(Line::from("  ╔═════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            row_spans.push(cell_span(snapshot, Position::new(row, col)));
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    // Bottom border
    lines.push(Line::from("  ╚═════════════════════╝"));

    // Selection indicator, only while drops are possible
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column && !snapshot.outcome.is_terminal() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  1-7/Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_status_text() {
        let players = PlayersConfig::default();

        let state = GameState::new();
        assert_eq!(status_text(&state.snapshot(), &players), "Current Player: Player 1");

        let state = GameState::from_moves(&[0]).unwrap();
        assert_eq!(status_text(&state.snapshot(), &players), "Current Player: Player 2");

        let state = GameState::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(status_text(&state.snapshot(), &players), "Winner: Player 1");
    }

    #[test]
    fn test_winning_cells_are_highlighted() {
        let state = GameState::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
        let snapshot = state.snapshot();

        let span = cell_span(&snapshot, Position::new(2, 0));
        assert!(span.style.add_modifier.contains(Modifier::REVERSED));

        let span = cell_span(&snapshot, Position::new(5, 1));
        assert!(!span.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_last_move_is_marked() {
        let state = GameState::from_moves(&[2, 5]).unwrap();
        let snapshot = state.snapshot();

        assert_eq!(cell_span(&snapshot, Position::new(5, 5)).content, "(●)");
        assert_eq!(cell_span(&snapshot, Position::new(5, 2)).content, " ● ");
        assert_eq!(cell_span(&snapshot, Position::new(0, 0)).content, " . ");
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = GameState::from_moves(&[3, 3]).unwrap();
        let players = PlayersConfig::default();

        terminal
            .draw(|f| {
                render(
                    f,
                    &state.snapshot(),
                    &state.legal_columns(),
                    3,
                    Some("hello"),
                    &players,
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Connect Four"));
        assert!(text.contains("Current Player: Player 1"));
        assert!(text.contains("hello"));
    }
}
