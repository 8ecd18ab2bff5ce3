//! Search filter over the mirror.
//!
//! A record matches when its title contains the search text ignoring case,
//! or when its year written in decimal contains the search text. The mirror
//! is never mutated and matches keep their original relative order.

use crate::book::Book;

/// True when `book` satisfies the title/year substring predicate.
pub fn matches(book: &Book, search: &str) -> bool {
    book.title.to_lowercase().contains(&search.to_lowercase())
        || book.year.to_string().contains(search)
}

/// Subsequence of `books` matching `search`. Empty search keeps everything.
pub fn filter_books<'a>(books: &'a [Book], search: &str) -> Vec<&'a Book> {
    if search.is_empty() {
        return books.iter().collect();
    }
    books.iter().filter(|book| matches(book, search)).collect()
}
