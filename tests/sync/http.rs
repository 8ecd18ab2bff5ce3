//! `HttpBookApi` against an axum stand-in for the REST backend.

use std::sync::atomic::Ordering;
use std::time::Duration;

use bookshelf::api::{ApiError, BookApi, Endpoints, HttpBookApi, InMemoryBookApi};
use bookshelf::book::{Book, BookInput};
use bookshelf::config::ClientConfig;
use bookshelf::sync::{AssumeYes, Outcome, Synchronizer};
use bookshelf::view::EmptyState;
use bookshelf::ShelfError;

use crate::support::server;
use crate::support::{classics, Backend};

async fn start(store: InMemoryBookApi) -> (Backend, String) {
    let backend = Backend::new(store);
    let base = server::start(backend.clone()).await;
    (backend, base)
}

fn client(base: &str) -> HttpBookApi {
    HttpBookApi::new(Endpoints::new(base).with_profile_path("abarca"))
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn list_get_and_writes_round_trip() {
    let (backend, base) = start(InMemoryBookApi::with_books(classics())).await;
    let api = client(&base);

    assert_eq!(api.list().await.unwrap(), classics());
    assert_eq!(api.get(2).await.unwrap(), Book::new(2, "Ficciones", 1944));

    api.create(&BookInput::new("Rayuela", 1963)).await.unwrap();
    api.update(1, &BookInput::new("Don Quixote", 1605)).await.unwrap();
    api.delete(3).await.unwrap();

    assert_eq!(
        backend.store.books(),
        vec![
            Book::new(1, "Don Quixote", 1605),
            Book::new(2, "Ficciones", 1944),
            Book::new(4, "Rayuela", 1963),
        ]
    );
}

#[tokio::test]
async fn null_list_means_empty() {
    let (_backend, base) = start(InMemoryBookApi::new()).await;
    assert_eq!(client(&base).list().await.unwrap(), Vec::<Book>::new());
}

#[tokio::test]
async fn error_status_ignores_body() {
    let (backend, base) = start(InMemoryBookApi::with_books(classics())).await;
    let api = client(&base);

    assert_eq!(api.get(99).await.unwrap_err(), ApiError::Status(404));
    assert_eq!(
        api.update(99, &BookInput::new("x", 1)).await.unwrap_err(),
        ApiError::Status(404)
    );

    backend.fail_list.store(true, Ordering::SeqCst);
    assert_eq!(api.list().await.unwrap_err(), ApiError::Status(500));
}

#[tokio::test]
async fn profile_uses_wire_field_name() {
    let (_backend, base) = start(InMemoryBookApi::new()).await;

    let profile = client(&base).profile().await.unwrap().expect("profile");
    assert_eq!(profile.full_name, "Ada Lovelace");

    let without = HttpBookApi::new(Endpoints::new(&base));
    assert_eq!(without.profile().await.unwrap(), None);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Port 9 (discard) is closed on test hosts.
    let api = HttpBookApi::new(Endpoints::new("http://127.0.0.1:9"));
    assert!(matches!(api.list().await.unwrap_err(), ApiError::Transport(_)));
}

// ============================================================================
// Synchronizer over HTTP
// ============================================================================

#[tokio::test]
async fn full_session_over_http() {
    let (backend, base) = start(InMemoryBookApi::new()).await;
    let config = ClientConfig {
        base_url: format!("{base}/"),
        profile_path: Some("/abarca".into()),
        ..ClientConfig::default()
    };
    let shelf = Synchronizer::from_config(HttpBookApi::from_config(&config), &config);

    shelf.mount().await.unwrap();
    let view = shelf.view("");
    assert_eq!(view.empty, Some(EmptyState::NoRecords));
    assert_eq!(view.heading.as_deref(), Some("Ada Lovelace"));

    shelf.open_new();
    shelf.set_title("Don Quijote");
    shelf.set_year_input("1605");
    assert_eq!(shelf.submit().await.unwrap(), Outcome::Done);
    assert_eq!(shelf.books(), vec![Book::new(1, "Don Quijote", 1605)]);

    assert!(shelf.open_edit_id(1));
    shelf.set_year_input("1615");
    shelf.submit().await.unwrap();
    assert_eq!(shelf.view("1615").rows, vec![Book::new(1, "Don Quijote", 1615)]);

    shelf.delete(1, &AssumeYes).await.unwrap();
    assert!(shelf.books().is_empty());
    assert!(backend.store.books().is_empty());
}

#[tokio::test]
async fn server_error_becomes_banner() {
    let (backend, base) = start(InMemoryBookApi::with_books(classics())).await;
    let shelf = Synchronizer::new(client(&base));
    shelf.mount().await.unwrap();

    backend.fail_list.store(true, Ordering::SeqCst);
    let err = shelf.refresh().await.unwrap_err();

    assert_eq!(err, ShelfError::fetch(ApiError::Status(500)));
    assert_eq!(shelf.books(), classics());
    assert_eq!(
        shelf.view("").banner.as_deref(),
        Some("failed to fetch books: server responded with HTTP 500")
    );
}

#[tokio::test]
async fn slow_backend_hits_request_timeout() {
    let (backend, base) = start(InMemoryBookApi::with_books(classics())).await;
    backend.delay_ms.store(500, Ordering::SeqCst);
    let shelf = Synchronizer::new(client(&base))
        .with_request_timeout(Some(Duration::from_millis(50)));

    let err = shelf.refresh().await.unwrap_err();

    assert_eq!(err, ShelfError::fetch(ApiError::Timeout(Duration::from_millis(50))));
    assert!(!shelf.is_busy());
    assert!(shelf.books().is_empty());
}
