//! Persistence of the last generated itinerary in ~/.local/share/plate-planner/.
//!
//! Keeps the original Markdown next to the preferences it was generated from, so a
//! revision or an HTML export never has to reconstruct Markdown from rendered output.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::paths;
use crate::core::preferences::PreferenceSet;

const MARKDOWN_FILE: &str = "itinerary.md";
const META_FILE: &str = "itinerary.json";

/// The last itinerary and what it was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedItinerary {
    pub markdown: String,
    pub preferences: PreferenceSet,
    pub saved_at: Option<DateTime<Local>>,
}

#[derive(Serialize, Deserialize)]
struct ItineraryMeta {
    preferences: PreferenceSet,
    saved_at: String,
}

/// Load the last itinerary from the data directory, if one was saved.
pub fn load_last_itinerary() -> Option<SavedItinerary> {
    load_from(&paths::data_dir()?)
}

/// Save into `dir`, creating it if needed.
pub fn save_in(dir: &Path, markdown: &str, preferences: &PreferenceSet) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(MARKDOWN_FILE), markdown)?;
    let meta = ItineraryMeta {
        preferences: preferences.clone(),
        saved_at: Local::now().to_rfc3339(),
    };
    let json = serde_json::to_string_pretty(&meta)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(dir.join(META_FILE), json)
}

/// Load from `dir`. Missing metadata is tolerated.
pub fn load_from(dir: &Path) -> Option<SavedItinerary> {
    let markdown = fs::read_to_string(dir.join(MARKDOWN_FILE)).ok()?;
    if markdown.trim().is_empty() {
        return None;
    }
    let meta: Option<ItineraryMeta> = fs::read_to_string(dir.join(META_FILE))
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok());
    let (preferences, saved_at) = match meta {
        Some(m) => (
            m.preferences,
            DateTime::parse_from_rfc3339(&m.saved_at)
                .ok()
                .map(|t| t.with_timezone(&Local)),
        ),
        None => (PreferenceSet::default(), None),
    };
    Some(SavedItinerary {
        markdown,
        preferences,
        saved_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_last_itinerary() {
        let dir = tempfile::tempdir().unwrap();

        let prefs = PreferenceSet {
            destination: Some("Houston".into()),
            ..Default::default()
        };
        save_in(dir.path(), "# Houston\n### Uchi\n- Address: 904 Westheimer Rd\n", &prefs)
            .unwrap();
        let saved = load_from(dir.path()).unwrap();
        assert!(saved.markdown.contains("### Uchi"));
        assert_eq!(saved.preferences, prefs);
        assert!(saved.saved_at.is_some());

        fs::remove_file(dir.path().join(META_FILE)).unwrap();
        let saved = load_from(dir.path()).unwrap();
        assert_eq!(saved.preferences, PreferenceSet::default());
    }

    #[test]
    fn blank_or_missing_markdown_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(dir.path()).is_none());
        fs::write(dir.path().join(MARKDOWN_FILE), "  \n").unwrap();
        assert!(load_from(dir.path()).is_none());
    }
}
