use crate::core::aggregate::{aggregate_with, is_locally_available};
use crate::core::ordering::{sort_books_by, OrderKey};
use crate::core::summary::{availability_message, summarize};
use crate::domain::model::{Book, BranchSelection, CopyCounting, RenderPass, RenderedBook};

/// Everything the page shows for one book under the given selection.
/// `position` is the book's index in the catalogue.
pub fn render_book(
    position: usize,
    book: &Book,
    selection: &BranchSelection,
    counting: CopyCounting,
) -> RenderedBook {
    let aggregation = aggregate_with(&book.availability, selection, counting);

    RenderedBook {
        position,
        id: book.id.clone(),
        title: book.title.clone(),
        year: book.year.clone(),
        has_local_copies: aggregation.locally_available_copies > 0,
        locally_available_copies: aggregation.locally_available_copies,
        available_copies: aggregation.available_copies,
        summary_html: summarize(&aggregation),
        availability_message: availability_message(&aggregation),
        row_flags: book
            .availability
            .iter()
            .map(|record| is_locally_available(record, selection))
            .collect(),
    }
}

/// `"(2 selected – Harpenden Library; St Albans Library)"`, or empty.
pub fn selected_branch_label(selection: &BranchSelection) -> String {
    if selection.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = selection.iter().collect();
    format!("({} selected \u{2013} {})", selection.len(), names.join("; "))
}

/// One full pass: every book recomputed from scratch, then reordered.
pub fn render_pass(books: &[Book], selection: &BranchSelection, counting: CopyCounting) -> RenderPass {
    let mut entries: Vec<(&Book, RenderedBook)> = books
        .iter()
        .enumerate()
        .map(|(position, book)| (book, render_book(position, book, selection, counting)))
        .collect();

    sort_books_by(&mut entries, |(book, rendered)| {
        OrderKey::new(rendered.locally_available_copies, book)
    });

    let with_local = entries.iter().filter(|(_, r)| r.has_local_copies).count();
    tracing::debug!(
        "Rendered {} books, {} with copies nearby ({} branches selected)",
        entries.len(),
        with_local,
        selection.len()
    );

    RenderPass {
        selection: selection.clone(),
        selected_branch_label: selected_branch_label(selection),
        books: entries.into_iter().map(|(_, rendered)| rendered).collect(),
    }
}
