//! Reviews view: stored places on the left, the selected place's card on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph};

use super::super::app::{App, ReviewsState};
use super::super::constants::{ACCENT, ACCENT_SECONDARY, NO_REVIEWS, WARNING};
use super::super::text::wrap_message;

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Lines of the card for the selected place.
pub(crate) fn card_lines(state: &ReviewsState, width: usize) -> Vec<Line<'static>> {
    let Some(index) = state.list_state.selected() else {
        return vec![];
    };
    let Some(place) = state.places.get(index) else {
        return vec![];
    };
    let mut lines = vec![Line::from(Span::styled(
        place.name.clone(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    for chunk in wrap_message(&place.address, width) {
        lines.push(Line::from(chunk));
    }
    if place.has_link() {
        lines.push(Line::from(Span::styled(
            place.maps_link.clone(),
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::default());

    if !state.enabled {
        lines.push(Line::from(Span::styled(
            "Reviews are off: set TRIP_ADVISOR_API_KEY to look them up.",
            Style::default().fg(WARNING),
        )));
        return lines;
    }
    match state.reviews.get(index) {
        Some(Some(reviews)) if reviews.is_empty() => {
            lines.push(Line::from(Span::styled(NO_REVIEWS, dim())));
        }
        Some(Some(reviews)) => {
            for review in reviews {
                for chunk in wrap_message(&review.to_string(), width) {
                    lines.push(Line::from(chunk));
                }
                lines.push(Line::default());
            }
        }
        _ => lines.push(Line::from(Span::styled(
            "Loading reviews...",
            dim().add_modifier(Modifier::ITALIC),
        ))),
    }
    lines
}

pub(crate) fn draw_reviews(f: &mut Frame, app: &mut App, area: Rect) {
    let state = &mut app.reviews;
    if state.places.is_empty() {
        let msg = if state.title.is_some() {
            "No restaurants with an address in this itinerary."
        } else {
            "No restaurants yet. Finish the planner and they will show up here."
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, dim())))
                .block(Block::default().padding(Padding::uniform(1))),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let list_title = match (&state.title, state.loading) {
        (Some(t), true) => format!(" {} (loading…) ", t),
        (Some(t), false) => format!(" {} ", t),
        (None, _) => " Restaurants ".to_string(),
    };
    let items: Vec<ListItem> = state
        .places
        .iter()
        .map(|p| ListItem::new(Line::from(p.name.clone())))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(dim())
                .title(Span::styled(list_title, Style::default().fg(ACCENT))),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT))
        .highlight_symbol("› ");
    f.render_stateful_widget(list, chunks[0], &mut state.list_state);

    let card = Block::default().padding(Padding::horizontal(2));
    let inner = card.inner(chunks[1]);
    f.render_widget(card, chunks[1]);
    let lines = card_lines(state, inner.width as usize);
    f.render_widget(Paragraph::new(lines), inner);
}
