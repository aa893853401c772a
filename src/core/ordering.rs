use crate::domain::model::{AvailabilityAggregation, Book};
use std::cmp::Ordering;

/// The three things books are sorted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderKey<'a> {
    pub locally_available_copies: usize,
    pub title: &'a str,
    pub year: Option<f64>,
}

impl<'a> OrderKey<'a> {
    pub fn new(locally_available_copies: usize, book: &'a Book) -> Self {
        Self {
            locally_available_copies,
            title: &book.title,
            year: book.numeric_year(),
        }
    }
}

/// Most nearby copies first, then title, then newest year.
///
/// A year that is not a number sorts after every numeric year.
pub fn compare(a: &OrderKey<'_>, b: &OrderKey<'_>) -> Ordering {
    b.locally_available_copies
        .cmp(&a.locally_available_copies)
        .then_with(|| a.title.cmp(b.title))
        .then_with(|| match (a.year, b.year) {
            (Some(ay), Some(by)) => by.total_cmp(&ay),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Stable sort of `items` by the key each one maps to.
pub fn sort_books_by<T, F>(items: &mut [T], key: F)
where
    F: for<'x> Fn(&'x T) -> OrderKey<'x>,
{
    items.sort_by(|a, b| compare(&key(a), &key(b)));
}

/// Books in display order. Entries that tie on every key keep their input order.
pub fn order<'b>(entries: Vec<(&'b Book, AvailabilityAggregation<'_>)>) -> Vec<&'b Book> {
    let mut keyed: Vec<(&'b Book, usize)> = entries
        .into_iter()
        .map(|(book, aggregation)| (book, aggregation.locally_available_copies))
        .collect();

    sort_books_by(&mut keyed, |(book, local)| OrderKey::new(*local, book));

    keyed.into_iter().map(|(book, _)| book).collect()
}
