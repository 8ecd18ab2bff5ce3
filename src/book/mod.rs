//! Book records as exchanged with the remote collection.
//!
//! The remote store owns identity: ids are assigned on create and never
//! change. The client only ever sends `BookInput` (title + year) and reads
//! back full `Book` rows.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store.
pub type BookId = i64;

/// A book row as returned by `GET /books`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub year: i32,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            year,
        }
    }

    /// The body that would recreate this record's editable fields.
    pub fn input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            year: self.year,
        }
    }
}

/// Request body for create (`POST /books`) and update (`PUT /books/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub year: i32,
}

impl BookInput {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    /// Attach a store-assigned id.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            year: self.year,
        }
    }
}

/// Display record served by the optional auxiliary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
}
