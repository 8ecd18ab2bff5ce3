//! URL layout of the remote book resource.

use std::fmt;

use crate::book::BookId;

/// One route of the remote contract, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    pub url: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {}", self.method, self.url)
    }
}

/// Builds request URLs from one configurable base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    profile_path: Option<String>,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            profile_path: None,
        }
    }

    /// Enable the auxiliary display endpoint (e.g. `/abarca`).
    pub fn with_profile_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.profile_path = if path.is_empty() {
            None
        } else if path.starts_with('/') {
            Some(path)
        } else {
            Some(format!("/{path}"))
        };
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn books(&self) -> String {
        format!("{}/books", self.base)
    }

    pub fn book(&self, id: BookId) -> String {
        format!("{}/books/{}", self.base, id)
    }

    pub fn profile(&self) -> Option<String> {
        self.profile_path
            .as_ref()
            .map(|path| format!("{}{}", self.base, path))
    }

    /// The full route table, in the order a user would read it.
    pub fn table(&self) -> Vec<Endpoint> {
        let item = format!("{}/books/:id", self.base);
        let mut routes = vec![
            Endpoint {
                method: "GET",
                url: self.books(),
            },
            Endpoint {
                method: "GET",
                url: item.clone(),
            },
            Endpoint {
                method: "POST",
                url: self.books(),
            },
            Endpoint {
                method: "PUT",
                url: item.clone(),
            },
            Endpoint {
                method: "DELETE",
                url: item,
            },
        ];
        if let Some(url) = self.profile() {
            routes.push(Endpoint { method: "GET", url });
        }
        routes
    }
}
