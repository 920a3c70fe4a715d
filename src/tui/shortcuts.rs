//! Centralized keyboard shortcuts.
//!
//! | Action          | Keys                         |
//! |-----------------|------------------------------|
//! | Send answer     | Enter                        |
//! | Switch view     | Tab                          |
//! | Cancel request  | Esc                          |
//! | Scroll chat     | ↑ ↓                          |
//! | Scroll itinerary| PageUp PageDown              |
//! | Open map link   | Enter / o (Reviews view)     |
//! | Copy map link   | c (Reviews view)             |
//! | Refresh reviews | r (Reviews view)             |
//! | Quit            | Ctrl+C                       |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Shortcuts handled the same way in every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Switch between Planner and Reviews (Tab, Shift+Tab)
    SwitchView,
    /// Cancel the model request in flight (Esc)
    Cancel,
    /// Quit (Ctrl+C)
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches one.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Shortcut::Quit)
            }
            KeyCode::Tab | KeyCode::BackTab => Some(Shortcut::SwitchView),
            KeyCode::Esc => Some(Shortcut::Cancel),
            _ => None,
        }
    }
}


/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span, Text};

    use super::super::app::View;

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(view: View, busy: bool) -> Text<'static> {
        let line = match (view, busy) {
            (View::Planner, true) => Line::from(vec![
                Span::styled("Esc ", Color::Yellow),
                Span::raw("cancel"),
                Span::styled("  PgUp/PgDn ", DIM),
                Span::raw("itinerary"),
                Span::styled("  Tab ", DIM),
                Span::raw("reviews"),
            ]),
            (View::Planner, false) => Line::from(vec![
                Span::styled("Enter ", DIM),
                Span::raw("send"),
                Span::styled("  ↑↓ ", DIM),
                Span::raw("chat"),
                Span::styled("  PgUp/PgDn ", DIM),
                Span::raw("itinerary"),
                Span::styled("  Tab ", DIM),
                Span::raw("reviews"),
                Span::styled("  Ctrl+C ", DIM),
                Span::raw("quit"),
            ]),
            (View::Reviews, _) => Line::from(vec![
                Span::styled("↑↓ ", DIM),
                Span::raw("select"),
                Span::styled("  Enter/o ", DIM),
                Span::raw("open map"),
                Span::styled("  c ", DIM),
                Span::raw("copy link"),
                Span::styled("  r ", DIM),
                Span::raw("refresh"),
                Span::styled("  Tab ", DIM),
                Span::raw("planner"),
                Span::styled("  Ctrl+C ", DIM),
                Span::raw("quit"),
            ]),
        };
        Text::from(line)
    }
}
