//! Client configuration.
//!
//! One base URL replaces the per-deployment hardcoded addresses. Values are
//! layered: built-in defaults, then a TOML file, then `BOOKSHELF_*`
//! environment variables, then whatever the caller (e.g. CLI flags) sets last.
//!
//! ```toml
//! base_url = "http://localhost:5000"
//! request_timeout_ms = 5000
//! profile_path = "/abarca"
//! ```

mod load;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::Endpoints;

pub use load::{
    apply_env_overrides, apply_overrides, default_path, load, load_file, load_with,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound for each remote call; `0` disables the bound.
    pub request_timeout_ms: u64,
    /// Path of the auxiliary display endpoint, if the deployment has one.
    pub profile_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            profile_path: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        let endpoints = Endpoints::new(self.base_url.clone());
        match &self.profile_path {
            Some(path) => endpoints.with_profile_path(path.clone()),
            None => endpoints,
        }
    }
}
