use crate::game::{Board, Cell, Color, GameOutcome, PieceKind, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color as UiColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    board: &Board,
    active_color: Color,
    cursor: Position,
    highlights: &[Position],
    outcome: Option<GameOutcome>,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, active_color, outcome, chunks[0]);
    render_board(frame, board, cursor, highlights, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, board.settings().auto_upgrade, chunks[3]);
}

fn ui_color(color: Color) -> UiColor {
    match color {
        Color::Red => UiColor::Red,
        Color::Black => UiColor::Blue,
    }
}

fn cell_symbol(cell: Cell) -> (&'static str, UiColor) {
    match cell {
        Cell::Empty => (" . ", UiColor::DarkGray),
        Cell::Occupied(PieceKind::Ring, color) => (" \u{25cb} ", ui_color(color)),
        Cell::Occupied(PieceKind::Tower, color) => (" \u{25b2} ", ui_color(color)),
        Cell::Occupied(PieceKind::Laser, color) => (" \u{2726} ", ui_color(color)),
    }
}

fn render_header(
    frame: &mut Frame,
    active_color: Color,
    outcome: Option<GameOutcome>,
    area: ratatui::layout::Rect,
) {
    let (status, color) = match outcome {
        Some(GameOutcome::Winner(winner)) => {
            (format!("Game Over: {} wins", winner.name()), ui_color(winner))
        }
        Some(GameOutcome::Draw) => ("Game Over: Draw".to_string(), UiColor::Gray),
        None => (
            format!("Current Player: {}", active_color.name()),
            ui_color(active_color),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Ring Tactics"));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    cursor: Position,
    highlights: &[Position],
    area: ratatui::layout::Rect,
) {
    let size = board.settings().size as i32;
    let mut lines = Vec::new();

    let horizontal = "\u{2550}".repeat(3 * size as usize);
    lines.push(Line::from(format!("  \u{2554}{horizontal}\u{2557}")));

    for y in 0..size {
        let mut row_spans = vec![Span::raw("  \u{2551}")];

        for x in 0..size {
            let position = Position::new(x, y);
            let (symbol, color) = cell_symbol(board.cell_at(position));

            let mut style = Style::default().fg(color);
            if highlights.contains(&position) {
                style = style.bg(UiColor::Cyan);
            }
            if position == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw("\u{2551}"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  \u{255a}{horizontal}\u{255d}")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(UiColor::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, auto_upgrade: bool, area: ratatui::layout::Rect) {
    let line1 = Line::from("\u{2190}\u{2191}\u{2192}\u{2193}: Move  |  Enter: Place / Select  |  R: Restart  |  Q: Quit");
    let line2 = if auto_upgrade {
        Line::from("Combines trigger automatically; pick a highlighted cell for the new piece")
    } else {
        Line::from("U: Combine the run through the selected piece")
    };

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
