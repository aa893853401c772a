use crate::core::html::escape;
use crate::core::location::describe;
use crate::domain::model::AvailabilityRecord;
use std::collections::HashMap;

/// Occurrence counts that remember the order labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: String) {
        match self.index.get(&label) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(label.clone(), self.entries.len());
                self.entries.push((label, 1));
            }
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }
}

impl FromIterator<String> for Tally {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for label in iter {
            tally.add(label);
        }
        tally
    }
}

/// Group copies by their shelf label, first-seen order.
pub fn tally<'a, I>(records: I) -> Tally
where
    I: IntoIterator<Item = &'a AvailabilityRecord>,
{
    records.into_iter().map(describe).collect()
}

/// `<ul>` of shelf labels; repeats collapse to `label (×\u{2009}N)`.
pub fn list_of_copies<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a AvailabilityRecord>,
{
    let items: String = tally(records)
        .iter()
        .map(|(label, count)| {
            if count > 1 {
                format!("<li>{} (\u{d7}\u{2009}{})</li>", escape(label), count)
            } else {
                format!("<li>{}</li>", escape(label))
            }
        })
        .collect();

    format!("<ul>{}</ul>", items)
}
