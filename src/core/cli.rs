//! CLI-only commands: config info, key storage, extract, places, reviews, render, plan.
//!
//! These run without opening the TUI and produce plain text output.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::core::app;
use crate::core::config::{self, Config};
use crate::core::credentials::{self, Provider};
use crate::core::itinerary::{self, ItineraryStore, NamePolicy, NormalizedPlace};
use crate::core::llm::{ItineraryModel, OpenRouterModel, StreamHooks};
use crate::core::paths;
use crate::core::persistence;
use crate::core::preferences::{self, PreferenceSet};
use crate::core::reviews::{ReviewLookup, ReviewSet};
use crate::core::session::{self, PlannerSession};

type CliResult = Result<(), Box<dyn Error>>;

const NO_REVIEWS: &str = "No reviews found";

fn display_path(p: Option<std::path::PathBuf>) -> String {
    p.map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn key_status(provider: Provider) -> &'static str {
    if std::env::var(provider.env_var())
        .ok()
        .is_some_and(|v| !v.trim().is_empty())
    {
        "set ✓ (env)"
    } else if credentials::load_stored_key(provider).is_some() {
        "set ✓ (stored)"
    } else {
        "not set"
    }
}

/// Run the `config` command: display paths, model, policy, and key status.
pub fn run_config(config: &Config) {
    println!("{} {}", app::NAME, app::VERSION);
    println!("Config:      {}", display_path(paths::config_dir()));
    println!("Cache:       {}", display_path(paths::cache_dir()));
    println!("Data:        {}", display_path(paths::data_dir()));
    println!("Store:       {}", config.store_path.display());
    println!("Model:       {}", config.model_label());
    println!("Name policy: {}", config.name_policy);
    println!("Reviews:     {}", config.reviews.base_url);
    println!("OpenRouter:  {}", key_status(Provider::Openrouter));
    println!("TripAdvisor: {}", key_status(Provider::Tripadvisor));
}

/// Run the `config set-key` command: store a provider key in the config directory.
pub fn run_set_key(provider: Provider, key: Option<String>) -> CliResult {
    let key = match key {
        Some(k) if !k.trim().is_empty() => k.trim().to_string(),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf.trim().to_string()
        }
    };
    let path = credentials::store_key(provider, &key)?;
    println!("{} key saved to {}", provider.env_var(), path.display());
    Ok(())
}

/// Title from the first top-level heading, for Markdown that did not come
/// from the planner.
fn markdown_title(markdown: &str) -> String {
    markdown
        .lines()
        .find_map(|l| l.strip_prefix("# "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Food Itinerary")
        .to_string()
}

/// Run the `extract` command: read Markdown, write the store, print records.
pub fn run_extract(config: &Config, file: &Path) -> CliResult {
    let markdown = fs::read_to_string(file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let records = itinerary::extract_restaurants(&markdown);
    let store = ItineraryStore::new(&config.store_path);
    store.save(&markdown_title(&markdown), &records)?;

    for r in &records {
        println!("{}\n  {}\n  {}", r.name, r.address, r.maps_link);
    }
    eprintln!(
        "{} restaurant(s) saved to {}",
        records.len(),
        store.path().display()
    );
    Ok(())
}

fn load_places(config: &Config, policy: Option<NamePolicy>) -> Vec<NormalizedPlace> {
    let store = ItineraryStore::new(&config.store_path);
    let records = store.load_or_empty();
    itinerary::normalize_places(&records, policy.unwrap_or(config.name_policy))
}

/// Run the `places` command: print normalized places from the store.
pub fn run_places(config: &Config, policy: Option<NamePolicy>, json: bool) -> CliResult {
    let places = load_places(config, policy);
    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }
    if places.is_empty() {
        println!("No restaurants found in {}", config.store_path.display());
        return Ok(());
    }
    for p in &places {
        println!("{}\n  {}", p.name, p.address);
    }
    Ok(())
}

fn print_card(place: &NormalizedPlace, reviews: &ReviewSet) {
    println!("{}", place.name);
    println!("  {}", place.address);
    if place.has_link() {
        println!("  Map: {}", place.maps_link);
    }
    if reviews.is_empty() {
        println!("  {}", NO_REVIEWS);
    }
    for r in reviews {
        println!("  {}", r);
    }
    println!();
}

/// Run the `reviews` command: look up reviews for every stored place.
pub async fn run_reviews(
    config: &Config,
    policy: Option<NamePolicy>,
    concurrency: Option<usize>,
) -> CliResult {
    let places = load_places(config, policy);
    if places.is_empty() {
        println!("No restaurants found in {}", config.store_path.display());
        return Ok(());
    }
    let lookup = ReviewLookup::from_config(&config.reviews);
    if !lookup.is_enabled() {
        eprintln!("TRIP_ADVISOR_API_KEY is not set; skipping review lookup.");
    }
    let concurrency = concurrency.unwrap_or(config.reviews.concurrency);
    let all = lookup.lookup_all(&places, concurrency).await;
    for (place, reviews) in places.iter().zip(&all) {
        print_card(place, reviews);
    }
    Ok(())
}

/// Run the `render` command: Markdown file (or the last itinerary) to HTML.
pub fn run_render(input: Option<&Path>, output: Option<&Path>) -> CliResult {
    let (title, markdown) = match input {
        Some(path) => {
            let md = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            (markdown_title(&md), md)
        }
        None => {
            let saved = persistence::load_last_itinerary()
                .ok_or("No saved itinerary yet; pass a Markdown file or run `plan` first")?;
            (saved.preferences.title(), saved.markdown)
        }
    };
    let html = itinerary::render_html(&title, &markdown);
    match output {
        Some(path) => {
            fs::write(path, html)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Answers file: keys as in the questionnaire. Select answers matching an option
/// are stored as that option; blanks are ignored.
fn read_answers(path: &Path) -> Result<PreferenceSet, Box<dyn Error>> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let raw: PreferenceSet = serde_json::from_str(&data)
        .map_err(|e| format!("Invalid answers in {}: {}", path.display(), e))?;
    let mut prefs = PreferenceSet::default();
    for q in preferences::questions() {
        let Some(value) = raw.get(&q.key) else {
            continue;
        };
        if let Some(v) = preferences::validate_answer(q, value)? {
            prefs.set(&q.key, v);
        }
    }
    Ok(prefs)
}

/// Run the `plan` command: gather preferences, stream the itinerary to stdout,
/// write the store (and optionally an HTML page).
pub async fn run_plan(
    config: &Config,
    from_text: Option<&str>,
    answers: Option<&Path>,
    html: Option<&Path>,
) -> CliResult {
    let model = OpenRouterModel::new(config.llm()?);

    let mut prefs = match answers {
        Some(path) => read_answers(path)?,
        None => PreferenceSet::default(),
    };
    if let Some(text) = from_text.map(str::trim).filter(|t| !t.is_empty()) {
        match model.extract_preferences(text).await {
            Ok(found) => prefs.merge_missing(&found),
            Err(e) => log::warn!("Could not read preferences from text: {}", e),
        }
        if prefs.get("additional_notes").is_none() {
            prefs.set("additional_notes", text);
        }
    }
    if prefs.get("destination").is_none() {
        return Err("No destination found; name one in --from-text or the answers file".into());
    }
    let missing = prefs.missing_required();
    if !missing.is_empty() {
        log::info!("Planning without: {}", missing.join(", "));
    }

    // Placeholder page so a browser already pointed at the file shows progress.
    if let Some(path) = html {
        fs::write(path, itinerary::render_pending_html(&prefs.title()))?;
    }

    let session = PlannerSession::new(ItineraryStore::new(&config.store_path), config.name_policy);
    let print_chunk = |s: &str| {
        let mut out = io::stdout();
        let _ = out.write_all(s.as_bytes());
        let _ = out.flush();
    };
    let hooks = StreamHooks {
        on_content_chunk: Some(&print_chunk),
        cancel: None,
    };
    let outcome = session
        .generate(&model, &prefs, &hooks)
        .await
        .map_err(|e| session::generation_failure_message(&e))?;
    println!();

    if let Some(warning) = &outcome.store_warning {
        eprintln!("Warning: {}", warning);
    } else {
        eprintln!(
            "{} restaurant(s) saved to {}",
            outcome.restaurants.len(),
            session.store().path().display()
        );
    }
    if let Some(path) = html {
        fs::write(path, itinerary::render_html(&outcome.title, &outcome.markdown))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// Config for commands that need it; exits with the error message otherwise.
pub fn load_config_or_exit() -> Config {
    config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}
