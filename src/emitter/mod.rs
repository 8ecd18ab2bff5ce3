//! Change notifications for front ends.
//!
//! Requires the `emitter` feature. Wraps `event_emitter_rs::EventEmitter`
//! so listeners can be registered and fired through `&self`; listeners run
//! off the calling thread.
//!
//! ```ignore
//! use bookshelf::sync::ShelfEvent;
//!
//! shelf.on(ShelfEvent::BooksRefreshed, |count| {
//!     println!("{count} books");
//! });
//! ```

use event_emitter_rs::EventEmitter;
use parking_lot::Mutex;

use crate::sync::ShelfEvent;

pub struct ShelfEmitter {
    event_emitter: Mutex<EventEmitter>,
}

impl Default for ShelfEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfEmitter {
    pub fn new() -> Self {
        Self {
            event_emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener for an event.
    pub fn on<F>(&self, event: ShelfEvent, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.lock().on(event.as_str(), listener);
    }

    /// Fire an event to every registered listener.
    pub fn emit(&self, event: ShelfEvent, data: impl Into<String>) {
        self.event_emitter.lock().emit(event.as_str(), data.into());
    }
}
