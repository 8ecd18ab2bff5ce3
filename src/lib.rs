pub mod api;
pub mod book;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod sync;
pub mod view;

#[cfg(feature = "emitter")]
pub mod emitter;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod telemetry;

pub use api::{ApiError, BookApi, Endpoints, InMemoryBookApi};
#[cfg(feature = "http")]
pub use api::HttpBookApi;
pub use book::{Book, BookId, BookInput, Profile};
pub use config::{ClientConfig, ConfigError};
pub use error::{ShelfError, WriteOp};
pub use filter::filter_books;
pub use form::{Draft, DraftMode};
pub use sync::{AssumeNo, AssumeYes, Confirm, Outcome, ShelfEvent, ShelfState, Synchronizer};
pub use view::{EmptyState, ShelfView};
