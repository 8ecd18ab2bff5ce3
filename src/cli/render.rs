//! Plain-text output for the view model.

use std::fmt::Write as _;
use std::io;

use crate::api::Endpoints;
use crate::book::Book;
use crate::view::ShelfView;

pub(crate) fn shelf(out: &mut impl io::Write, view: &ShelfView) -> io::Result<()> {
    out.write_all(format_shelf(view).as_bytes())
}

pub(crate) fn book(out: &mut impl io::Write, book: &Book) -> io::Result<()> {
    writeln!(out, "{}", format_row(book))
}

pub(crate) fn endpoints(out: &mut impl io::Write, endpoints: &Endpoints) -> io::Result<()> {
    for endpoint in endpoints.table() {
        writeln!(out, "{endpoint}")?;
    }
    Ok(())
}

fn format_row(book: &Book) -> String {
    format!("#{:<4} {} ({})", book.id, book.title, book.year)
}

pub(crate) fn format_shelf(view: &ShelfView) -> String {
    let mut out = String::new();
    if let Some(heading) = &view.heading {
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(out, "{}", "-".repeat(heading.chars().count()));
    }
    if let Some(banner) = &view.banner {
        let _ = writeln!(out, "error: {banner}");
    }
    for row in &view.rows {
        let _ = writeln!(out, "{}", format_row(row));
    }
    if let Some(empty) = view.empty {
        let _ = writeln!(out, "{empty}");
    }
    out
}
