//! TUI rendering: layout for the Planner and Reviews views.

mod conversation;
mod header;
mod input;
mod itinerary;
mod reviews;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::Instant;

use super::app::{App, View};
use super::constants::{ACCENT, INPUT_HEIGHT};

const HEADER_HEIGHT: u16 = 2;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let input_height = match app.view {
        View::Planner => INPUT_HEIGHT,
        View::Reviews => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0]);

    match app.view {
        View::Planner => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[1]);
            conversation::draw_conversation(f, app, body[0]);
            itinerary::draw_itinerary(f, app, body[1]);
            input::draw_input_block(f, app, chunks[2]);
        }
        View::Reviews => reviews::draw_reviews(f, app, chunks[1]),
    }
    input::draw_bottom_bar(f, app, chunks[3]);

    draw_toast(f, app, area);
}

/// Toast: top right, below header. Opaque background so it's visible over the panes.
fn draw_toast(f: &mut Frame, app: &mut App, area: Rect) {
    let Some((text, deadline)) = &app.toast else {
        return;
    };
    if *deadline <= Instant::now() {
        app.toast = None;
        return;
    }
    let toast_text = format!(" {} ", text);
    let toast_width = (toast_text.chars().count() as u16 + 2).min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
        y: area.y + HEADER_HEIGHT,
        width: toast_width,
        height: 3,
    };
    f.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(Color::Black));
    let para = Paragraph::new(Line::from(toast_text))
        .block(block)
        .style(Style::default().fg(ACCENT).bg(Color::Black));
    f.render_widget(para, toast_area);
}
