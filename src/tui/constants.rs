//! TUI constants: colors, timing, and fixed messages.

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent, soft cyan (#7EC8E3).
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

pub(super) const WARNING: Color = Color::Yellow;
pub(super) const ERROR: Color = Color::LightRed;

pub(super) const WELCOME: &str = "Hi! I'll help you plan where to eat on your trip. \
You can answer each question, or describe the whole trip in your first message.";

/// First answers with at least this many words are read as a trip description.
pub(crate) const FREE_TEXT_MIN_WORDS: usize = 6;

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Input box height including borders.
pub(crate) const INPUT_HEIGHT: u16 = 3;

/// How long toasts ("Copied", "Opened in browser") stay up, in milliseconds.
pub(crate) const TOAST_MS: u64 = 1500;

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "◆";

/// Spinner frames for "thinking" animation (braille pattern, 4 frames).
pub(super) const LOGO_THINKING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];

/// Shown in the itinerary pane while the first chunk is awaited.
pub(super) const PENDING_ITINERARY: &str =
    "Generating your personalized food itinerary...\nThis may take a moment";

pub(super) const NO_REVIEWS: &str = "No reviews found";
