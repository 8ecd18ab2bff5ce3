//! Property tests: filter law and mirror/remote agreement.

use proptest::prelude::*;

use bookshelf::api::BookApi;
use bookshelf::book::{Book, BookInput};
use bookshelf::filter::filter_books;
use bookshelf::sync::{AssumeYes, Synchronizer};

use crate::support::MockApi;

fn book_strategy() -> impl Strategy<Value = Book> {
    (1i64..500, "[A-Za-zÁÉáéñ ]{0,12}", 1000i32..2100)
        .prop_map(|(id, title, year)| Book::new(id, title, year))
}

fn satisfies(book: &Book, search: &str) -> bool {
    book.title.to_lowercase().contains(&search.to_lowercase())
        || book.year.to_string().contains(search)
}

proptest! {
    #[test]
    fn filter_is_ordered_subsequence_of_matches(
        mirror in prop::collection::vec(book_strategy(), 0..30),
        search in "[A-Za-z0-9ñ ]{0,4}",
    ) {
        let filtered = filter_books(&mirror, &search);

        let expected: Vec<&Book> = mirror
            .iter()
            .filter(|b| search.is_empty() || satisfies(b, &search))
            .collect();
        prop_assert_eq!(&filtered, &expected);

        // Order preserved: each hit appears after the previous one.
        let mut cursor = 0;
        for hit in &filtered {
            let offset = mirror[cursor..]
                .iter()
                .position(|b| std::ptr::eq(b, *hit));
            prop_assert!(offset.is_some());
            cursor += offset.unwrap_or(0) + 1;
        }
    }

    #[test]
    fn search_is_case_insensitive_on_title(
        mirror in prop::collection::vec(book_strategy(), 0..20),
        search in "[a-z]{1,3}",
    ) {
        prop_assert_eq!(
            filter_books(&mirror, &search),
            filter_books(&mirror, &search.to_uppercase())
        );
    }
}

#[derive(Debug, Clone)]
enum Action {
    Create { title: String, year: i32 },
    Update { target: u8, title: String },
    Delete { target: u8 },
    Refresh,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        ("[a-z]{1,8}", 1900i32..2030).prop_map(|(title, year)| Action::Create { title, year }),
        (0u8..16, "[a-z]{1,8}").prop_map(|(target, title)| Action::Update { target, title }),
        (0u8..16).prop_map(|target| Action::Delete { target }),
        Just(Action::Refresh),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mirror_never_drifts_from_remote(actions in prop::collection::vec(action_strategy(), 1..24)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async {
            let shelf = Synchronizer::new(MockApi::new());
            shelf.mount().await.unwrap();

            for action in actions {
                // Targets index into the current mirror; misses hit a 404.
                let pick = |target: u8| {
                    let books = shelf.books();
                    books
                        .get(usize::from(target) % books.len().max(1))
                        .map(|b| b.id)
                        .unwrap_or(1000 + i64::from(target))
                };
                let _ = match action {
                    Action::Create { title, year } => {
                        shelf.create(BookInput::new(title, year)).await
                    }
                    Action::Update { target, title } => {
                        shelf.update(pick(target), BookInput::new(title, 2000)).await
                    }
                    Action::Delete { target } => shelf.delete(pick(target), &AssumeYes).await,
                    Action::Refresh => shelf.refresh().await,
                };
                assert_eq!(shelf.books(), shelf.api().store().list().await.unwrap());
                assert!(!shelf.is_busy());
            }
        });
    }
}
