//! InMemoryBookApi - process-local book collection with remote-store semantics.
//!
//! Ids are assigned from an auto-increment counter starting at 1, rows keep
//! insertion order, and unknown ids answer `Status(404)`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{ApiError, BookApi};
use crate::book::{Book, BookId, BookInput, Profile};

/// In-memory book store. Clone-friendly via Arc; clones share the same rows.
#[derive(Clone)]
pub struct InMemoryBookApi {
    storage: Arc<RwLock<Vec<Book>>>,
    next_id: Arc<AtomicI64>,
    profile: Option<Profile>,
}

impl Default for InMemoryBookApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookApi {
    pub fn new() -> Self {
        InMemoryBookApi {
            storage: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            profile: None,
        }
    }

    /// Seed with existing rows. The id counter continues after the largest id.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        InMemoryBookApi {
            storage: Arc::new(RwLock::new(books)),
            next_id: Arc::new(AtomicI64::new(next)),
            profile: None,
        }
    }

    pub fn with_profile(mut self, full_name: impl Into<String>) -> Self {
        self.profile = Some(Profile {
            full_name: full_name.into(),
        });
        self
    }

    /// Current rows, bypassing the async API.
    pub fn books(&self) -> Vec<Book> {
        self.storage
            .read()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Insert and return the stored row.
    pub fn insert(&self, input: &BookInput) -> Result<Book, ApiError> {
        let mut rows = self
            .storage
            .write()
            .map_err(|_| ApiError::Transport("store lock poisoned".into()))?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let book = input.clone().with_id(id);
        rows.push(book.clone());
        Ok(book)
    }
}

#[async_trait]
impl BookApi for InMemoryBookApi {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let rows = self
            .storage
            .read()
            .map_err(|_| ApiError::Transport("store lock poisoned".into()))?;
        Ok(rows.clone())
    }

    async fn get(&self, id: BookId) -> Result<Book, ApiError> {
        let rows = self
            .storage
            .read()
            .map_err(|_| ApiError::Transport("store lock poisoned".into()))?;
        rows.iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn create(&self, input: &BookInput) -> Result<(), ApiError> {
        self.insert(input).map(|_| ())
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<(), ApiError> {
        let mut rows = self
            .storage
            .write()
            .map_err(|_| ApiError::Transport("store lock poisoned".into()))?;
        let row = rows
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ApiError::Status(404))?;
        row.title = input.title.clone();
        row.year = input.year;
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), ApiError> {
        let mut rows = self
            .storage
            .write()
            .map_err(|_| ApiError::Transport("store lock poisoned".into()))?;
        let pos = rows
            .iter()
            .position(|b| b.id == id)
            .ok_or(ApiError::Status(404))?;
        rows.remove(pos);
        Ok(())
    }

    async fn profile(&self) -> Result<Option<Profile>, ApiError> {
        Ok(self.profile.clone())
    }
}
