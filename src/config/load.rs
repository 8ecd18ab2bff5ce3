use std::fs;
use std::path::{Path, PathBuf};

use super::{ClientConfig, ConfigError};

const ENV_BASE_URL: &str = "BOOKSHELF_BASE_URL";
const ENV_TIMEOUT_MS: &str = "BOOKSHELF_TIMEOUT_MS";
const ENV_PROFILE_PATH: &str = "BOOKSHELF_PROFILE_PATH";

/// `./bookshelf.toml`, consulted when no explicit path is given.
pub fn default_path() -> PathBuf {
    PathBuf::from("bookshelf.toml")
}

pub fn load_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })
}

/// Defaults, then the file (explicit path must exist; the default path is
/// optional), then environment overrides.
pub fn load(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    load_with(path, |key| std::env::var(key).ok())
}

/// [`load`] with environment variables read through `lookup`.
pub fn load_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => {
            let path = default_path();
            if path.exists() {
                load_file(&path)?
            } else {
                ClientConfig::default()
            }
        }
    };
    apply_overrides(&mut config, lookup);
    Ok(config)
}

pub fn apply_env_overrides(config: &mut ClientConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply `BOOKSHELF_*` overrides read through `lookup`. Blank values are
/// ignored; malformed numbers are logged and ignored.
pub fn apply_overrides(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = lookup(ENV_BASE_URL) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.base_url = trimmed.to_string();
        }
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<u64>() {
                Ok(value) => config.request_timeout_ms = value,
                Err(err) => tracing::warn!("invalid {ENV_TIMEOUT_MS}, ignoring: {err}"),
            }
        }
    }

    if let Some(raw) = lookup(ENV_PROFILE_PATH) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.profile_path = Some(trimmed.to_string());
        }
    }
}
