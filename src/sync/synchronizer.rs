use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;

use super::busy::BusyGuard;
use super::{Confirm, Outcome, ShelfEvent, ShelfState};
use crate::api::{ApiError, BookApi};
use crate::book::{Book, BookId, BookInput, Profile};
use crate::config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::error::{ShelfError, WriteOp};
use crate::form::Draft;
use crate::view::ShelfView;

#[cfg(feature = "emitter")]
use crate::emitter::ShelfEmitter;

/// Prompt shown before a delete is sent.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this book?";

/// Owns the local mirror of a remote book collection and mediates every
/// remote call.
///
/// Writes are never applied locally: each successful create/update/delete is
/// followed by a full refetch that replaces the mirror, so the mirror is
/// either what the server last returned or unchanged.
pub struct Synchronizer<A> {
    api: A,
    state: Mutex<ShelfState>,
    cancel: Notify,
    /// Bumped by every `cancel()`; an operation is cancelled once this moves
    /// past the value it started with.
    cancel_epoch: AtomicU64,
    request_timeout: Option<Duration>,
    #[cfg(feature = "emitter")]
    emitter: ShelfEmitter,
}

impl<A: BookApi> Synchronizer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(ShelfState::default()),
            cancel: Notify::new(),
            cancel_epoch: AtomicU64::new(0),
            request_timeout: Some(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            #[cfg(feature = "emitter")]
            emitter: ShelfEmitter::new(),
        }
    }

    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::new(api).with_request_timeout(config.request_timeout())
    }

    /// Bound every remote call; `None` waits indefinitely.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> ShelfState {
        self.state.lock().clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.state.lock().books.clone()
    }

    pub fn draft(&self) -> Option<Draft> {
        self.state.lock().draft.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.lock().profile.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().busy
    }

    /// Everything a front end renders, filtered by `search`.
    pub fn view(&self, search: &str) -> ShelfView {
        ShelfView::derive(&self.state.lock(), search)
    }

    // ------------------------------------------------------------------
    // Remote operations
    // ------------------------------------------------------------------

    /// Initial load: full fetch, then the one-shot auxiliary profile fetch.
    ///
    /// The profile is best effort. Its failure is logged and never reaches
    /// the error banner.
    pub async fn mount(&self) -> Result<Outcome, ShelfError> {
        let loaded = self.refresh().await;
        self.load_profile().await;
        loaded
    }

    /// Replace the mirror with the remote collection.
    pub async fn refresh(&self) -> Result<Outcome, ShelfError> {
        let epoch = self.epoch();
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            return Ok(Outcome::Busy);
        };
        self.reload(epoch).await?;
        Ok(Outcome::Done)
    }

    /// `GET /books/{id}`. Does not touch the mirror or the busy flag.
    pub async fn fetch_one(&self, id: BookId) -> Result<Book, ShelfError> {
        let epoch = self.epoch();
        self.state.lock().error = None;
        self.call(epoch, self.api.get(id))
            .await
            .map_err(|reason| self.raise(ShelfError::fetch(reason)))
    }

    /// Create a record, then refetch. The draft is discarded on success and
    /// kept on failure so the user can retry.
    pub async fn create(&self, input: BookInput) -> Result<Outcome, ShelfError> {
        if input.title.is_empty() {
            return Ok(Outcome::Invalid);
        }
        let epoch = self.epoch();
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            return Ok(Outcome::Busy);
        };
        let result = self.call(epoch, self.api.create(&input)).await;
        self.finish_write(WriteOp::Create, epoch, result).await
    }

    /// Modify a record by id, then refetch. Same draft contract as `create`.
    pub async fn update(&self, id: BookId, input: BookInput) -> Result<Outcome, ShelfError> {
        if input.title.is_empty() {
            return Ok(Outcome::Invalid);
        }
        let epoch = self.epoch();
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            return Ok(Outcome::Busy);
        };
        let result = self.call(epoch, self.api.update(id, &input)).await;
        self.finish_write(WriteOp::Update, epoch, result).await
    }

    /// Remove a record after `confirm` agrees, then refetch.
    ///
    /// A declined prompt sends nothing and leaves the state untouched.
    pub async fn delete<C>(&self, id: BookId, confirm: &C) -> Result<Outcome, ShelfError>
    where
        C: Confirm + ?Sized,
    {
        let epoch = self.epoch();
        if self.is_busy() {
            return Ok(Outcome::Busy);
        }
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(id, "delete declined");
            return Ok(Outcome::Declined);
        }
        let Some(_busy) = BusyGuard::acquire(&self.state) else {
            return Ok(Outcome::Busy);
        };
        let result = self.call(epoch, self.api.delete(id)).await;
        self.finish_write(WriteOp::Delete, epoch, result).await
    }

    /// Send the open draft: update when it has a target, create otherwise.
    pub async fn submit(&self) -> Result<Outcome, ShelfError> {
        let Some(draft) = self.draft() else {
            return Ok(Outcome::NoDraft);
        };
        if !draft.can_submit() {
            return Ok(Outcome::Invalid);
        }
        match draft.target() {
            Some(id) => self.update(id, draft.input()).await,
            None => self.create(draft.input()).await,
        }
    }

    /// Abandon every operation already started. Whichever remote call it
    /// is in, or would start next (the refetch after a write included),
    /// fails with [`ApiError::Cancelled`] and the busy flag is released.
    /// Operations started after this call are unaffected.
    pub fn cancel(&self) {
        self.cancel_epoch.fetch_add(1, Ordering::SeqCst);
        self.cancel.notify_waiters();
    }

    // ------------------------------------------------------------------
    // Form intents
    // ------------------------------------------------------------------

    /// Open an empty create form.
    pub fn open_new(&self) {
        {
            let mut state = self.state.lock();
            state.draft = Some(Draft::new());
            state.error = None;
        }
        self.notify(ShelfEvent::DraftOpened, "create");
    }

    /// Open an edit form pre-populated from `book`.
    pub fn open_edit(&self, book: &Book) {
        {
            let mut state = self.state.lock();
            state.draft = Some(Draft::edit(book));
            state.error = None;
        }
        self.notify(ShelfEvent::DraftOpened, book.id.to_string());
    }

    /// Open an edit form for a record in the mirror. False if it is not there.
    pub fn open_edit_id(&self, id: BookId) -> bool {
        let book = self.state.lock().find(id).cloned();
        match book {
            Some(book) => {
                self.open_edit(&book);
                true
            }
            None => false,
        }
    }

    /// Cancel the form.
    pub fn close_draft(&self) {
        {
            let mut state = self.state.lock();
            state.draft = None;
            state.error = None;
        }
        self.notify(ShelfEvent::DraftClosed, "");
    }

    pub fn set_title(&self, title: impl Into<String>) {
        if let Some(draft) = self.state.lock().draft.as_mut() {
            draft.set_title(title);
        }
    }

    /// Raw year text; unparsable input becomes the current year.
    pub fn set_year_input(&self, input: &str) {
        if let Some(draft) = self.state.lock().draft.as_mut() {
            draft.set_year_input(input);
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register a listener for a state change. Delivery is asynchronous.
    #[cfg(feature = "emitter")]
    pub fn on<F>(&self, event: ShelfEvent, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Full fetch under an already-held busy guard.
    async fn reload(&self, epoch: u64) -> Result<(), ShelfError> {
        match self.call(epoch, self.api.list()).await {
            Ok(books) => {
                let count = books.len();
                {
                    let mut state = self.state.lock();
                    state.books = books;
                    state.loaded = true;
                }
                tracing::info!(count, "mirror replaced");
                self.notify(ShelfEvent::BooksRefreshed, count.to_string());
                Ok(())
            }
            Err(reason) => Err(self.raise(ShelfError::fetch(reason))),
        }
    }

    async fn finish_write(
        &self,
        op: WriteOp,
        epoch: u64,
        result: Result<(), ApiError>,
    ) -> Result<Outcome, ShelfError> {
        if let Err(reason) = result {
            return Err(self.raise(ShelfError::write(op, reason)));
        }
        tracing::debug!(%op, "write accepted");
        if op != WriteOp::Delete {
            let had_draft = self.state.lock().draft.take().is_some();
            if had_draft {
                self.notify(ShelfEvent::DraftClosed, "");
            }
        }
        self.reload(epoch).await?;
        Ok(Outcome::Done)
    }

    async fn load_profile(&self) {
        let epoch = self.epoch();
        {
            let mut state = self.state.lock();
            if state.profile_checked {
                return;
            }
            state.profile_checked = true;
        }
        match self.call(epoch, self.api.profile()).await {
            Ok(profile) => self.state.lock().profile = profile,
            Err(err) => tracing::debug!("profile fetch failed, ignoring: {err}"),
        }
    }

    fn epoch(&self) -> u64 {
        self.cancel_epoch.load(Ordering::SeqCst)
    }

    /// Apply the timeout and the cancel signal to one remote call of an
    /// operation that started at `epoch`.
    async fn call<T, F>(&self, epoch: u64, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        // Register before checking the epoch so a concurrent cancel is seen
        // by one or the other.
        let cancelled = self.cancel.notified();
        tokio::pin!(cancelled);
        cancelled.as_mut().enable();
        if self.epoch() != epoch {
            return Err(ApiError::Cancelled);
        }

        let bounded = async {
            match self.request_timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Timeout(limit))),
                None => request.await,
            }
        };
        tokio::select! {
            result = bounded => result,
            _ = cancelled => Err(ApiError::Cancelled),
        }
    }

    /// Record `err` as the banner and hand it back.
    fn raise(&self, err: ShelfError) -> ShelfError {
        let message = err.to_string();
        tracing::warn!("{message}");
        self.state.lock().error = Some(message.clone());
        self.notify(ShelfEvent::ErrorRaised, message);
        err
    }

    #[cfg(feature = "emitter")]
    fn notify(&self, event: ShelfEvent, data: impl Into<String>) {
        self.emitter.emit(event, data);
    }

    #[cfg(not(feature = "emitter"))]
    fn notify(&self, _event: ShelfEvent, _data: impl Into<String>) {}
}
