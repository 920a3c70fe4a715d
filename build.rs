//! Build script: validates questions.json at compile time.

use std::collections::HashSet;
use std::path::PathBuf;

const KINDS: &[&str] = &["text", "date", "number", "multiselect", "select", "optional"];

/// Fields of `PreferenceSet`; every question must fill one of them.
const KEYS: &[&str] = &[
    "destination",
    "dates",
    "travelers",
    "cuisines",
    "dietary_restrictions",
    "budget",
    "experience",
    "additional_notes",
];

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "questions.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", config_path.display());
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. questions.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    struct QuestionEntry {
        key: String,
        prompt: String,
        kind: String,
        #[serde(default)]
        options: Vec<String>,
    }
    let entries: Vec<QuestionEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "questions.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if entries.is_empty() {
        panic!("questions.json must define at least one question");
    }
    let mut seen = HashSet::new();
    for entry in &entries {
        if !KEYS.contains(&entry.key.as_str()) {
            panic!("questions.json: unknown preference key '{}'", entry.key);
        }
        if !seen.insert(entry.key.as_str()) {
            panic!("questions.json: duplicate key '{}'", entry.key);
        }
        if entry.prompt.trim().is_empty() {
            panic!("questions.json: question '{}' has an empty prompt", entry.key);
        }
        if !KINDS.contains(&entry.kind.as_str()) {
            panic!(
                "questions.json: question '{}' has unknown kind '{}'",
                entry.key, entry.kind
            );
        }
        if entry.kind == "select" && entry.options.is_empty() {
            panic!(
                "questions.json: select question '{}' needs options",
                entry.key
            );
        }
    }
}
