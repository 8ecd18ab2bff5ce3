//! Book API: the seam between the synchronizer and the remote collection.
//!
//! `BookApi` is the transport the [`Synchronizer`](crate::sync::Synchronizer)
//! talks to. The remote store is authoritative: every write is followed by a
//! full `list()` on the caller's side, so implementations never need to
//! return the written record.
//!
//! ## Implementations
//!
//! - [`HttpBookApi`] (feature `http`): reqwest against a REST backend.
//! - [`InMemoryBookApi`]: process-local store with the same semantics, for
//!   tests, demos, and running without a backend.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::api::{BookApi, InMemoryBookApi};
//! use bookshelf::book::BookInput;
//!
//! let api = InMemoryBookApi::new();
//! api.create(&BookInput::new("Rayuela", 1963)).await?;
//! assert_eq!(api.list().await?.len(), 1);
//! ```

mod endpoints;
#[cfg(feature = "http")]
mod http;
mod in_memory;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::book::{Book, BookId, BookInput, Profile};

pub use endpoints::{Endpoint, Endpoints};
#[cfg(feature = "http")]
pub use http::HttpBookApi;
pub use in_memory::InMemoryBookApi;

/// Failure of a single remote call.
///
/// Every non-2xx status maps to `Status` regardless of the response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Remote book collection.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /books`: the whole collection in store order.
    async fn list(&self) -> Result<Vec<Book>, ApiError>;

    /// `GET /books/{id}`.
    async fn get(&self, id: BookId) -> Result<Book, ApiError>;

    /// `POST /books`.
    async fn create(&self, input: &BookInput) -> Result<(), ApiError>;

    /// `PUT /books/{id}`.
    async fn update(&self, id: BookId, input: &BookInput) -> Result<(), ApiError>;

    /// `DELETE /books/{id}`.
    async fn delete(&self, id: BookId) -> Result<(), ApiError>;

    /// Auxiliary display record. `Ok(None)` when the deployment has none.
    async fn profile(&self) -> Result<Option<Profile>, ApiError> {
        Ok(None)
    }
}

#[async_trait]
impl<T: BookApi + ?Sized> BookApi for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        (**self).list().await
    }

    async fn get(&self, id: BookId) -> Result<Book, ApiError> {
        (**self).get(id).await
    }

    async fn create(&self, input: &BookInput) -> Result<(), ApiError> {
        (**self).create(input).await
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<(), ApiError> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: BookId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }

    async fn profile(&self) -> Result<Option<Profile>, ApiError> {
        (**self).profile().await
    }
}
