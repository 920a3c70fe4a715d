//! TUI (Text User Interface): the planner conversation, itinerary pane, and reviews view.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use app::App;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::config::Config;
use crate::core::itinerary::ItineraryStore;
use crate::core::llm::{ItineraryModel, OpenRouterModel};
use crate::core::reviews::ReviewLookup;
use crate::core::session::PlannerSession;

use draw::draw;
use handlers::{HandleResult, Pending, Services};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for model and review calls.
pub fn run(config: Arc<Config>) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let llm = config.llm().map_err(io::Error::other)?;
    let model: Arc<dyn ItineraryModel> = Arc::new(OpenRouterModel::new(llm));
    let session = Arc::new(PlannerSession::new(
        ItineraryStore::new(&config.store_path),
        config.name_policy,
    ));
    let lookup = ReviewLookup::from_config(&config.reviews);
    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );
    let services = Services {
        model,
        session,
        lookup,
        concurrency: config.reviews.concurrency,
        rt,
    };

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Kitty keyboard protocol: Alt+key as single event with modifier (Ghostty, WezTerm, kitty, etc.)
    let _ = execute!(
        io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    );

    let mut app = App::new(
        config.model_label().to_string(),
        services.lookup.is_enabled(),
    );
    let mut pending = Pending::default();
    // Places from an earlier run are browsable before the new itinerary is ready.
    handlers::refresh_reviews(&mut app, &services, &mut pending);

    loop {
        handlers::poll_pending(&mut app, &services, &mut pending);

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))?
            && let Event::Key(key) = event::read()?
            && handlers::handle_key(key, &mut app, &services, &mut pending) == HandleResult::Break
        {
            break;
        }
    }

    log::info!("Planner closed");
    terminal.show_cursor()?;
    Ok(())
}
