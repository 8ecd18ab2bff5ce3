//! Render-ready projection of the synchronizer state.
//!
//! `ShelfView` is derived, never stored: it is recomputed from a
//! [`ShelfState`] and the current search text whenever either changes.

use std::fmt;

use crate::book::Book;
use crate::filter::filter_books;
use crate::form::DraftMode;
use crate::sync::ShelfState;

/// Why the list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// No list fetch has succeeded yet.
    NotLoaded,
    /// Nothing to show and no search active.
    NoRecords,
    /// The search text filtered everything out.
    NoMatches,
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyState::NotLoaded => write!(f, "Books not loaded"),
            EmptyState::NoRecords => write!(f, "No books registered"),
            EmptyState::NoMatches => write!(f, "No books match your search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfView {
    /// Filtered rows in mirror order.
    pub rows: Vec<Book>,
    pub empty: Option<EmptyState>,
    /// Error banner, if any.
    pub banner: Option<String>,
    /// An operation is in flight; mutating actions are disabled.
    pub busy: bool,
    /// Display name from the auxiliary endpoint.
    pub heading: Option<String>,
    /// Mode of the open draft, `None` when the form is closed.
    pub editing: Option<DraftMode>,
    /// The submit action is enabled.
    pub can_submit: bool,
}

impl ShelfView {
    pub fn derive(state: &ShelfState, search: &str) -> Self {
        let rows: Vec<Book> = filter_books(&state.books, search)
            .into_iter()
            .cloned()
            .collect();
        let empty = match (rows.is_empty(), state.loaded, search.is_empty()) {
            (false, _, _) => None,
            (true, false, _) => Some(EmptyState::NotLoaded),
            (true, true, true) => Some(EmptyState::NoRecords),
            (true, true, false) => Some(EmptyState::NoMatches),
        };
        ShelfView {
            rows,
            empty,
            banner: state.error.clone(),
            busy: state.busy,
            heading: state.profile.as_ref().map(|p| p.full_name.clone()),
            editing: state.draft.as_ref().map(|d| d.mode()),
            can_submit: !state.busy && state.draft.as_ref().is_some_and(|d| d.can_submit()),
        }
    }
}
