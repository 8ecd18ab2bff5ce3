//! Draft form state for creating or editing one book.
//!
//! A draft is the transient title/year pair behind the create/edit form.
//! Its `target` decides what submitting it means:
//!
//! - `None`: create a new record (`POST /books`)
//! - `Some(id)`: modify an existing record (`PUT /books/{id}`)
//!
//! Year input never leaves the draft in an invalid state: text that does not
//! start with an integer, or that reads as zero, is replaced by the current
//! calendar year rather than rejected.

use chrono::Datelike;

use crate::book::{Book, BookId, BookInput};

/// Whether a draft creates or updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Update(BookId),
}

/// Title/year pair being edited, plus the optional update target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    title: String,
    year: i32,
    target: Option<BookId>,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

impl Draft {
    /// Empty title, current year, create mode.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            year: current_year(),
            target: None,
        }
    }

    /// Pre-populated from an existing record, update mode.
    pub fn edit(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            year: book.year,
            target: Some(book.id),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn target(&self) -> Option<BookId> {
        self.target
    }

    pub fn mode(&self) -> DraftMode {
        match self.target {
            Some(id) => DraftMode::Update(id),
            None => DraftMode::Create,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
    }

    /// Apply raw year text, falling back to the current year.
    pub fn set_year_input(&mut self, input: &str) {
        self.year = parse_year_or(input, current_year());
    }

    /// Only the title is validated; any year is accepted.
    pub fn can_submit(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn input(&self) -> BookInput {
        BookInput::new(self.title.clone(), self.year)
    }
}

/// Calendar year of the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Leading-integer parse of form text. Whitespace before the number is
/// skipped and anything after the digits is ignored; no digits, zero, or
/// overflow yield `fallback`.
pub fn parse_year_or(input: &str, fallback: i32) -> i32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return fallback;
    }
    let Ok(value) = digits[..end].parse::<i32>() else {
        return fallback;
    };
    let value = if negative { -value } else { value };
    if value == 0 {
        fallback
    } else {
        value
    }
}
