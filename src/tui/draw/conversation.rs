//! Conversation pane: planner prompts, your answers, warnings, and errors, with scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::super::app::{App, PlannerMessage};
use super::super::constants::{ACCENT_SECONDARY, ERROR, WARNING};
use super::super::text::{parse_markdown_inline, wrap_message};

/// One message: a bar in the speaker's color, then wrapped content, then a blank line.
fn add_message(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    content: &str,
    color: Color,
    markdown: bool,
    width: usize,
) {
    let bar_style = Style::default().fg(color);
    lines.push(Line::from(Span::styled(
        label.to_string(),
        bar_style.add_modifier(Modifier::BOLD),
    )));
    for chunk in wrap_message(content, width.saturating_sub(2).max(1)) {
        let mut spans = vec![Span::styled("│ ", bar_style)];
        if markdown {
            spans.extend(parse_markdown_inline(&chunk));
        } else {
            spans.push(Span::styled(chunk, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());
}

pub(crate) fn conversation_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in &app.messages {
        match msg {
            PlannerMessage::Planner(s) => add_message(&mut lines, "Planner", s, ACCENT_SECONDARY, true, width),
            PlannerMessage::You(s) => add_message(&mut lines, "You", s, Color::Gray, false, width),
            PlannerMessage::Warning(s) => add_message(&mut lines, "Note", s, WARNING, false, width),
            PlannerMessage::Error(s) => add_message(&mut lines, "Error", s, ERROR, false, width),
        }
    }
    if app.phase.is_busy() {
        lines.push(Line::from(Span::styled(
            "  Thinking... ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

pub(crate) fn draw_conversation(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];

    let lines = conversation_lines(app, text_area.width as usize);
    let total_lines = lines.len();
    let visible = text_area.height as usize;
    app.conversation_scroll.last_max = total_lines.saturating_sub(visible.max(1));
    let scroll_pos = app.conversation_scroll.line();
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();
    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT_SECONDARY))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
