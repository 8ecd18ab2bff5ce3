use std::fmt;

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Which mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Create => write!(f, "create"),
            WriteOp::Update => write!(f, "update"),
            WriteOp::Delete => write!(f, "delete"),
        }
    }
}

/// Failure raised by a synchronizer operation.
///
/// The display string is what lands in the error banner, so it stays on a
/// single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShelfError {
    /// Reading the collection (or one record) failed; the mirror is unchanged.
    #[error("failed to fetch books: {reason}")]
    FetchFailed { reason: ApiError },
    /// A create/update/delete failed; the draft or confirmation is retained.
    #[error("failed to {op} book: {reason}")]
    WriteFailed { op: WriteOp, reason: ApiError },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ShelfError {
    pub fn fetch(reason: ApiError) -> Self {
        ShelfError::FetchFailed { reason }
    }

    pub fn write(op: WriteOp, reason: ApiError) -> Self {
        ShelfError::WriteFailed { op, reason }
    }

    /// The underlying remote failure, if any.
    pub fn reason(&self) -> Option<&ApiError> {
        match self {
            ShelfError::FetchFailed { reason } | ShelfError::WriteFailed { reason, .. } => {
                Some(reason)
            }
            ShelfError::Config(_) => None,
        }
    }
}
