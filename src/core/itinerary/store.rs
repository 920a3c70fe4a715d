//! Itinerary store: the JSON file handed from the planner to the Reviews view.
//!
//! Layout: a JSON array whose element 0 is a header record (itinerary title, no
//! address), followed by one `{"name", "address", "maps_link"}` object per restaurant.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::RestaurantRecord;

/// Errors reading or writing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access itinerary store: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid itinerary store JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed restaurant list shared between the planning and review stages.
#[derive(Debug, Clone)]
pub struct ItineraryStore {
    path: PathBuf,
}

impl ItineraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `[header, records...]`, pretty-printed, non-ASCII kept as is.
    /// Writes through a temp file and rename so readers never see a partial file.
    pub fn save(&self, title: &str, records: &[RestaurantRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut entries = Vec::with_capacity(records.len() + 1);
        entries.push(RestaurantRecord::header(title));
        entries.extend_from_slice(records);

        let json = serde_json::to_string_pretty(&entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!(
            "Saved {} restaurant(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load every entry, header included.
    pub fn load(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Load for display: a missing or unreadable store counts as zero restaurants.
    pub fn load_or_empty(&self) -> Vec<RestaurantRecord> {
        match self.load() {
            Ok(records) => records,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("No itinerary store at {}", self.path.display());
                vec![]
            }
            Err(e) => {
                log::warn!("Error loading {}: {}", self.path.display(), e);
                vec![]
            }
        }
    }

    /// Title from the header entry, if the store exists and has one.
    pub fn title(&self) -> Option<String> {
        self.load_or_empty()
            .into_iter()
            .next()
            .map(|header| header.name)
            .filter(|name| !name.is_empty())
    }
}
