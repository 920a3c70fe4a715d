//! API key storage: load and persist provider keys in the config directory.
//!
//! Each key lives in its own file with restrictive permissions (0o600 on Unix).
//! Environment variables take precedence; stored keys are the fallback.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::core::paths;

/// External services that need a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    /// LLM used to generate and revise itineraries.
    Openrouter,
    /// Restaurant review lookup.
    Tripadvisor,
}

impl Provider {
    /// Environment variable checked before the stored key.
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::Openrouter => "OPENROUTER_API_KEY",
            Provider::Tripadvisor => "TRIP_ADVISOR_API_KEY",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Provider::Openrouter => "openrouter-api-key",
            Provider::Tripadvisor => "tripadvisor-api-key",
        }
    }
}

/// Errors when storing a key.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("API key is empty")]
    Empty,
    #[error("Failed to store API key: {0}")]
    Io(#[from] io::Error),
}

/// Path to a provider's key file in the config directory.
pub fn credentials_path(provider: Provider) -> Option<PathBuf> {
    paths::config_dir().map(|d| d.join(provider.file_name()))
}

/// Load the stored key. Returns `None` if the file is absent, empty, or unreadable.
pub fn load_stored_key(provider: Provider) -> Option<String> {
    let path = credentials_path(provider)?;
    let content = fs::read_to_string(&path).ok()?;
    let key = content.trim().to_string();
    if key.is_empty() { None } else { Some(key) }
}

/// Store a key in the config directory, creating it if needed.
pub fn store_key(provider: Provider, key: &str) -> Result<PathBuf, CredentialsError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(CredentialsError::Empty);
    }
    let path = credentials_path(provider).ok_or(CredentialsError::NoConfigDir)?;
    let dir = path.parent().ok_or(CredentialsError::NoConfigDir)?;
    fs::create_dir_all(dir)?;

    let mut file = fs::File::create(&path)?;
    file.write_all(trimmed.as_bytes())?;
    file.write_all(b"\n")?;

    #[cfg(unix)]
    {
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var("TEST_CONFIG_DIR", dir.path()) };

        let path = store_key(Provider::Tripadvisor, "  ta-key-123 \n").unwrap();
        assert!(path.ends_with("tripadvisor-api-key"));
        assert_eq!(
            load_stored_key(Provider::Tripadvisor).as_deref(),
            Some("ta-key-123")
        );
        assert!(matches!(
            store_key(Provider::Openrouter, "   "),
            Err(CredentialsError::Empty)
        ));

        #[cfg(unix)]
        {
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        unsafe { std::env::remove_var("TEST_CONFIG_DIR") };
    }
}
