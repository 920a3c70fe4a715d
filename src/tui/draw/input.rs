//! Input box and bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::{App, Phase};
use super::super::constants::ACCENT;
use super::super::shortcuts::labels;

fn placeholder(app: &App) -> &'static str {
    match app.phase {
        Phase::Questions => "Type your answer... ",
        Phase::GenerationFailed => "Press Enter to try again ",
        Phase::AwaitingChanges => "List your changes, or type n to confirm ",
        Phase::Done => "All set. Tab for reviews ",
        Phase::ReadingPreferences | Phase::Generating | Phase::Revising => "Working... ",
    }
}

/// Draw the input block and set cursor position.
pub(crate) fn draw_input_block(f: &mut Frame, app: &App, area: Rect) {
    let busy = app.phase.is_busy();
    let content = if app.input.is_empty() {
        Span::styled(placeholder(app), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };
    let border = if busy { Color::DarkGray } else { ACCENT };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the end of long input visible.
    let width = inner.width as usize;
    let char_count = app.input.chars().count();
    let skip = char_count.saturating_sub(width.saturating_sub(1));
    let content = if skip > 0 {
        Span::raw(app.input.chars().skip(skip).collect::<String>())
    } else {
        content
    };
    f.render_widget(
        Paragraph::new(Line::from(content))
            .block(block)
            .style(Style::default().fg(Color::White)),
        area,
    );
    if !busy {
        let cx = inner.x + (char_count - skip).min(width) as u16;
        f.set_cursor_position(Position::new(cx, inner.y));
    }
}

/// Bottom bar: saved title on the left, shortcuts on the right.
pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(90)])
        .split(area);

    let status = app
        .frozen_preferences
        .as_ref()
        .map(|p| p.title())
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            status,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(labels::bottom_bar(app.view, app.phase.is_busy()))
            .alignment(Alignment::Right),
        chunks[1],
    );
}
