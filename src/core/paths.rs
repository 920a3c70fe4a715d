//! Centralized path helpers for config, cache, and data directories.

use std::path::PathBuf;

use crate::core::app;

/// Project directories (config, cache, data) from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Override dirs for tests via env vars (`TEST_CONFIG_DIR`).
#[cfg(test)]
fn test_dir_override(var: &str) -> Option<PathBuf> {
    std::env::var(var).ok().map(PathBuf::from)
}

/// Config directory (~/.config/plate-planner/). Holds stored API keys.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(test)]
    if let Some(p) = test_dir_override("TEST_CONFIG_DIR") {
        return Some(p);
    }
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Cache directory (~/.cache/plate-planner/). Holds the TUI log file.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Data directory (~/.local/share/plate-planner/): itinerary store and last itinerary.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().to_path_buf())
}

/// Default location of the itinerary store (`restaurants.json` in the data directory).
/// Falls back to the working directory when no platform data dir exists.
pub fn default_store_path() -> PathBuf {
    data_dir()
        .map(|d| d.join("restaurants.json"))
        .unwrap_or_else(|| PathBuf::from("restaurants.json"))
}
