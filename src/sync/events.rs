//! Change notification names emitted by the synchronizer.

/// State changes a front end may want to re-render on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShelfEvent {
    /// The mirror was replaced. Payload: new length.
    BooksRefreshed,
    /// The error banner was set. Payload: banner text.
    ErrorRaised,
    /// A draft was opened. Payload: `create` or the edited id.
    DraftOpened,
    /// The draft was discarded (cancel or successful submit). Payload: empty.
    DraftClosed,
}

impl ShelfEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfEvent::BooksRefreshed => "BooksRefreshed",
            ShelfEvent::ErrorRaised => "ErrorRaised",
            ShelfEvent::DraftOpened => "DraftOpened",
            ShelfEvent::DraftClosed => "DraftClosed",
        }
    }
}
