//! Busy gate, per-request timeout and cancellation.

use std::time::Duration;

use bookshelf::api::ApiError;
use bookshelf::book::BookInput;
use bookshelf::sync::{AssumeYes, Outcome, Synchronizer};
use bookshelf::ShelfError;

use crate::support::{classics, Call, MockApi};

async fn held_shelf() -> Synchronizer<MockApi> {
    let shelf = Synchronizer::new(MockApi::with_books(classics()));
    shelf.mount().await.unwrap();
    shelf.api().clear_calls();
    shelf.api().hold();
    shelf
}

// ============================================================================
// Busy gate
// ============================================================================

#[tokio::test]
async fn operations_during_flight_are_no_ops() {
    let shelf = held_shelf().await;

    // join! polls the refresh first, so it owns the busy flag and is parked
    // on the gate by the time the second branch runs.
    let (first, others) = tokio::join!(shelf.refresh(), async {
        assert!(shelf.is_busy());
        assert!(!shelf.view("").can_submit);
        let create = shelf.create(BookInput::new("Rayuela", 1963)).await;
        let update = shelf.update(1, BookInput::new("X", 1)).await;
        let delete = shelf.delete(1, &AssumeYes).await;
        let refresh = shelf.refresh().await;
        shelf.api().release(1);
        (create, update, delete, refresh)
    });

    assert_eq!(first.unwrap(), Outcome::Done);
    assert_eq!(others.0.unwrap(), Outcome::Busy);
    assert_eq!(others.1.unwrap(), Outcome::Busy);
    assert_eq!(others.2.unwrap(), Outcome::Busy);
    assert_eq!(others.3.unwrap(), Outcome::Busy);
    assert_eq!(shelf.api().calls(), vec![Call::List]);
    assert!(!shelf.is_busy());
}

#[tokio::test]
async fn busy_delete_does_not_prompt() {
    let shelf = held_shelf().await;
    let asked = std::sync::atomic::AtomicBool::new(false);
    let confirm = |_: &str| {
        asked.store(true, std::sync::atomic::Ordering::SeqCst);
        true
    };

    let (_, outcome) = tokio::join!(shelf.refresh(), async {
        let outcome = shelf.delete(2, &confirm).await;
        shelf.api().release(1);
        outcome
    });

    assert_eq!(outcome.unwrap(), Outcome::Busy);
    assert!(!asked.load(std::sync::atomic::Ordering::SeqCst));
}

#[tokio::test]
async fn busy_flag_spans_write_and_refetch() {
    let shelf = held_shelf().await;

    let (result, _) = tokio::join!(shelf.create(BookInput::new("Rayuela", 1963)), async {
        shelf.api().release(1);
        // Let the create land and the refetch start.
        while shelf.api().calls().len() < 2 {
            tokio::task::yield_now().await;
        }
        assert!(shelf.is_busy());
        shelf.api().release(1);
    });

    assert_eq!(result.unwrap(), Outcome::Done);
    assert_eq!(shelf.books().len(), 4);
    assert!(!shelf.is_busy());
}

// ============================================================================
// Timeout
// ============================================================================

#[tokio::test]
async fn slow_fetch_times_out_and_releases_busy() {
    let shelf = held_shelf()
        .await
        .with_request_timeout(Some(Duration::from_millis(50)));

    let err = shelf.refresh().await.unwrap_err();

    assert_eq!(
        err,
        ShelfError::fetch(ApiError::Timeout(Duration::from_millis(50)))
    );
    assert_eq!(
        shelf.error().as_deref(),
        Some("failed to fetch books: request timed out after 50 ms")
    );
    assert!(!shelf.is_busy());
    assert_eq!(shelf.books(), classics());
}

#[tokio::test]
async fn timed_out_write_keeps_draft() {
    let shelf = held_shelf()
        .await
        .with_request_timeout(Some(Duration::from_millis(50)));
    shelf.open_edit(&classics()[0]);
    shelf.set_title("Quijote");

    let err = shelf.submit().await.unwrap_err();

    assert!(matches!(
        err,
        ShelfError::WriteFailed {
            reason: ApiError::Timeout(_),
            ..
        }
    ));
    assert_eq!(shelf.draft().unwrap().title(), "Quijote");
    assert!(!shelf.is_busy());
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn cancel_aborts_inflight_refresh() {
    let shelf = held_shelf().await;

    let (result, _) = tokio::join!(shelf.refresh(), async { shelf.cancel() });

    assert_eq!(result.unwrap_err(), ShelfError::fetch(ApiError::Cancelled));
    assert_eq!(
        shelf.error().as_deref(),
        Some("failed to fetch books: request cancelled")
    );
    assert!(!shelf.is_busy());
    assert_eq!(shelf.books(), classics());
}

#[tokio::test]
async fn cancel_aborts_inflight_delete() {
    let shelf = held_shelf().await;

    let (result, _) = tokio::join!(shelf.delete(3, &AssumeYes), async { shelf.cancel() });

    assert_eq!(
        result.unwrap_err().to_string(),
        "failed to delete book: request cancelled"
    );
    assert_eq!(shelf.books(), classics());
    assert!(!shelf.is_busy());
}

#[tokio::test]
async fn cancel_with_nothing_in_flight_is_harmless() {
    let shelf = Synchronizer::new(MockApi::with_books(classics()));
    shelf.cancel();
    assert_eq!(shelf.refresh().await.unwrap(), Outcome::Done);
    assert_eq!(shelf.error(), None);
}

#[tokio::test]
async fn cancel_before_request_starts_is_not_lost() {
    let shelf = Synchronizer::new(MockApi::with_books(classics()));
    shelf.mount().await.unwrap();
    shelf.api().clear_calls();

    // Cancelled after the delete began but before its request went out.
    let confirm = |_: &str| {
        shelf.cancel();
        true
    };
    let err = shelf.delete(1, &confirm).await.unwrap_err();

    assert_eq!(err.reason(), Some(&ApiError::Cancelled));
    assert!(shelf.api().calls().is_empty());
    assert_eq!(shelf.books(), classics());
    assert!(!shelf.is_busy());

    // The next operation starts clean.
    assert_eq!(shelf.delete(1, &AssumeYes).await.unwrap(), Outcome::Done);
}

#[tokio::test]
async fn cancel_during_refetch_after_write() {
    let shelf = held_shelf().await;

    let (result, _) = tokio::join!(shelf.create(BookInput::new("Rayuela", 1963)), async {
        shelf.api().release(1);
        while shelf.api().calls().len() < 2 {
            tokio::task::yield_now().await;
        }
        shelf.cancel();
    });

    assert_eq!(result.unwrap_err(), ShelfError::fetch(ApiError::Cancelled));
    // The write landed; only the refetch was abandoned.
    assert_eq!(shelf.api().store().books().len(), 4);
    assert_eq!(shelf.books(), classics());
    assert!(!shelf.is_busy());
}
