use crate::book::{Book, Profile};
use crate::form::Draft;

/// Everything a synchronizer owns: the mirror, the open draft, the busy
/// flag, and the current error banner.
///
/// Readers get clones via [`Synchronizer::snapshot`](super::Synchronizer::snapshot);
/// only the synchronizer mutates the live copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfState {
    /// Mirror of the remote collection, in the order of the last full fetch.
    pub books: Vec<Book>,
    /// Open create/edit form. `None` means the form is closed.
    pub draft: Option<Draft>,
    pub busy: bool,
    /// Latest failure, as shown in the banner.
    pub error: Option<String>,
    /// Display record from the auxiliary endpoint.
    pub profile: Option<Profile>,
    /// True once any list fetch has succeeded.
    pub loaded: bool,
    pub(crate) profile_checked: bool,
}

impl ShelfState {
    pub fn find(&self, id: crate::book::BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }
}
