//! Collection synchronizer: local mirror of a remote book collection.
//!
//! `Synchronizer<A>` holds the mirror, the open draft, the busy flag and the
//! error banner, and drives every remote call through a [`BookApi`].
//!
//! ## Contract
//!
//! - **Refetch, never patch.** After a successful write the whole collection
//!   is fetched again and the mirror replaced.
//! - **One operation at a time.** Any operation started while another is in
//!   flight returns [`Outcome::Busy`] without contacting the remote.
//! - **Failures keep the last good data.** The mirror survives a failed
//!   fetch; the draft survives a failed write. The failure becomes a
//!   one-line banner, cleared when the next operation starts or the draft
//!   is opened or closed.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::api::InMemoryBookApi;
//! use bookshelf::sync::{AssumeYes, Synchronizer};
//!
//! let shelf = Synchronizer::new(InMemoryBookApi::new());
//! shelf.mount().await?;
//!
//! shelf.open_new();
//! shelf.set_title("Rayuela");
//! shelf.set_year_input("1963");
//! shelf.submit().await?;
//!
//! shelf.delete(1, &AssumeYes).await?;
//! ```
//!
//! [`BookApi`]: crate::api::BookApi

mod busy;
mod confirm;
mod events;
mod state;
mod synchronizer;

pub use confirm::{AssumeNo, AssumeYes, Confirm};
pub use events::ShelfEvent;
pub use state::ShelfState;
pub use synchronizer::{Synchronizer, DELETE_PROMPT};

/// How an operation ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote call (and any follow-up refetch) succeeded.
    Done,
    /// Another operation was in flight; nothing was sent.
    Busy,
    /// The confirmation prompt was declined; nothing was sent.
    Declined,
    /// Rejected client-side (empty title); nothing was sent.
    Invalid,
    /// `submit` with no open draft.
    NoDraft,
}
