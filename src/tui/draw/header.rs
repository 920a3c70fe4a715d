//! Header: logo (spinner while busy), view tabs, title, model name.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::app::DISPLAY_NAME;

use super::super::app::{App, View};
use super::super::constants::{ACCENT, LOGO_IDLE, LOGO_THINKING};

/// Max width for model name in header; longer names are truncated with "…".
const MODEL_HEADER_WIDTH: u16 = 28;

fn logo_symbol(app: &App) -> &'static str {
    match app.busy_since {
        Some(start) => {
            let frame = (start.elapsed().as_millis() as usize / 80) % LOGO_THINKING.len();
            LOGO_THINKING[frame]
        }
        None => LOGO_IDLE,
    }
}

fn tab(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Black).bg(ACCENT),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray))
    }
}

fn truncate_left(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let chars: Vec<char> = s.chars().collect();
        let start = chars.len().saturating_sub(max_len.saturating_sub(1));
        format!("…{}", chars[start..].iter().collect::<String>())
    } else {
        s.to_string()
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(0),
            Constraint::Length(MODEL_HEADER_WIDTH),
        ])
        .split(area);

    let mut left = vec![Span::styled(
        format!("{} ", logo_symbol(app)),
        Style::default().fg(ACCENT),
    )];
    left.push(tab("Planner", app.view == View::Planner));
    left.push(tab("Reviews", app.view == View::Reviews));
    f.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

    let title = Line::from(Span::styled(
        DISPLAY_NAME,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[1]);

    let model_line = Line::from(Span::styled(
        truncate_left(&app.model_label, MODEL_HEADER_WIDTH as usize),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(
        Paragraph::new(model_line).alignment(Alignment::Right),
        chunks[2],
    );
}
