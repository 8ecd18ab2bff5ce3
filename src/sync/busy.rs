use parking_lot::Mutex;

use super::ShelfState;

/// Holds the busy flag for the duration of one operation.
///
/// Acquiring is check-and-set under the state lock, so two operations can
/// never both observe "not busy". Dropping the guard clears the flag, which
/// also covers early returns, timeouts and cancellation.
pub(crate) struct BusyGuard<'a> {
    state: &'a Mutex<ShelfState>,
}

impl<'a> BusyGuard<'a> {
    /// `None` when another operation is in flight. Starting an operation
    /// clears the error banner.
    pub(crate) fn acquire(state: &'a Mutex<ShelfState>) -> Option<Self> {
        let mut guard = state.lock();
        if guard.busy {
            return None;
        }
        guard.busy = true;
        guard.error = None;
        Some(BusyGuard { state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().busy = false;
    }
}
