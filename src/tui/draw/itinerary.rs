//! Itinerary pane: the streamed draft or the last complete itinerary, as styled Markdown.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use super::super::app::{App, Phase};
use super::super::constants::{ACCENT, PENDING_ITINERARY};
use super::super::text::markdown_lines;

fn placeholder(app: &App) -> Vec<Line<'static>> {
    let text = if matches!(app.phase, Phase::Generating | Phase::Revising) {
        PENDING_ITINERARY
    } else {
        "Your itinerary will appear here once the questions are answered."
    };
    text.lines()
        .map(|l| {
            Line::from(Span::styled(
                l.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        })
        .collect()
}

pub(crate) fn draw_itinerary(f: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.phase {
        Phase::Generating | Phase::Revising => " Itinerary (writing…) ",
        _ => " Itinerary ",
    };
    let block = Block::default()
        .borders(Borders::NONE)
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let Some(lines) = app.itinerary_text().map(|md| markdown_lines(md, width)) else {
        app.itinerary_scroll.last_max = 0;
        f.render_widget(
            Paragraph::new(placeholder(app)).alignment(Alignment::Center),
            inner,
        );
        return;
    };
    let visible = inner.height as usize;
    app.itinerary_scroll.last_max = lines.len().saturating_sub(visible.max(1));
    let scroll_pos = app.itinerary_scroll.line();
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();
    f.render_widget(Paragraph::new(visible_lines), inner);
}
