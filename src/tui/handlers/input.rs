//! Planner view keys: typing answers, sending, and scrolling both panes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app::App;
use super::super::constants::{SCROLL_LINES_PAGE, SCROLL_LINES_SMALL};
use super::{Pending, Services, dispatch};

pub(super) fn handle_planner_key(
    key: KeyEvent,
    app: &mut App,
    services: &Services,
    pending: &mut Pending,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => {
            if pending.planner.is_some() {
                return;
            }
            if let Some(action) = app.submit(true) {
                dispatch(action, app, services, pending);
            }
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => app.input.clear(),
        (KeyCode::Backspace, _) => {
            app.input.pop();
        }
        (KeyCode::Up, _) => app.conversation_scroll.up(SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => app.conversation_scroll.down(SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => app.itinerary_scroll.up(SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => app.itinerary_scroll.down(SCROLL_LINES_PAGE),
        (KeyCode::Home, _) => app.itinerary_scroll.reset(),
        (KeyCode::End, _) => app.itinerary_scroll.follow(),
        (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.input.push(c);
        }
        _ => {}
    }
}
