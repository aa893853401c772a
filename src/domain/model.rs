use crate::utils::error::{LookupError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Status text the catalogue uses for a copy that is on the shelf.
pub const AVAILABLE: &str = "Available";

/// Current status of one physical copy.
///
/// Only the exact text `"Available"` counts as available; anything else
/// ("Onloan - Due: 02 Jun 2024", "In transit", ...) is kept verbatim so the
/// availability table can show it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CopyStatus {
    Available,
    Other(String),
}

impl CopyStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, CopyStatus::Available)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CopyStatus::Available => AVAILABLE,
            CopyStatus::Other(text) => text,
        }
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Other(String::new())
    }
}

impl From<String> for CopyStatus {
    fn from(text: String) -> Self {
        if text == AVAILABLE {
            CopyStatus::Available
        } else {
            CopyStatus::Other(text)
        }
    }
}

impl From<&str> for CopyStatus {
    fn from(text: &str) -> Self {
        CopyStatus::from(text.to_string())
    }
}

impl From<CopyStatus> for String {
    fn from(status: CopyStatus) -> Self {
        match status {
            CopyStatus::Available => AVAILABLE.to_string(),
            CopyStatus::Other(text) => text,
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Missing and `null` string fields both read as `""`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One physical copy of a book at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub collection: String,
    #[serde(default)]
    pub status: CopyStatus,
    #[serde(default, alias = "callNumber", deserialize_with = "lenient_string")]
    pub call_number: String,
}

impl AvailabilityRecord {
    pub fn new(
        location: impl Into<String>,
        collection: impl Into<String>,
        status: impl Into<CopyStatus>,
        call_number: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            collection: collection.into(),
            status: status.into(),
            call_number: call_number.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    Paperback,
    Hardback,
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookFormat::Paperback => f.write_str("paperback"),
            BookFormat::Hardback => f.write_str("hardback"),
        }
    }
}

/// 目錄中的一本書。`id` 在讀入時就確定，之後不會變。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBook")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub year: String,
    pub image: Option<String>,
    pub record_details: BTreeMap<String, serde_json::Value>,
    pub availability: Vec<AvailabilityRecord>,
}

/// Wire shape of a book before the identifier is resolved.
#[derive(Debug, Deserialize)]
struct RawBook {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    year: Option<serde_json::Value>,
    #[serde(default)]
    publication_year: Option<serde_json::Value>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    record_details: BTreeMap<String, serde_json::Value>,
    #[serde(alias = "availability_info")]
    availability: Vec<AvailabilityRecord>,
}

impl TryFrom<RawBook> for Book {
    type Error = LookupError;

    fn try_from(raw: RawBook) -> Result<Self> {
        let brn = raw
            .record_details
            .get("BRN")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let id = raw
            .id
            .into_iter()
            .chain(brn)
            .find(|candidate| !candidate.trim().is_empty())
            .ok_or_else(|| LookupError::MissingBookId {
                title: raw.title.clone(),
            })?;

        // 兩個欄位都有時，以 year 為準
        let year = match raw.year.filter(|v| !v.is_null()).or(raw.publication_year) {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        Ok(Book {
            id,
            title: raw.title,
            author: raw.author,
            year,
            image: raw.image,
            record_details: raw.record_details,
            availability: raw.availability,
        })
    }
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        availability: Vec<AvailabilityRecord>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: None,
            year: year.into(),
            image: None,
            record_details: BTreeMap::new(),
            availability,
        }
    }

    /// Year as a number for ordering. A blank year counts as 0; text that is
    /// not a number has no numeric value at all.
    pub fn numeric_year(&self) -> Option<f64> {
        let trimmed = self.year.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed.parse::<f64>().ok().filter(|y| y.is_finite())
    }

    /// 從 ISBN 欄位推斷平裝或精裝
    pub fn format(&self) -> Option<BookFormat> {
        let isbn = self.record_details.get("ISBN")?;
        let mentions = |needle: &str| match isbn {
            serde_json::Value::String(s) => s.contains(needle),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .any(|s| s.contains(needle)),
            _ => false,
        };

        if mentions("pbk") {
            Some(BookFormat::Paperback)
        } else if mentions("hbk") {
            Some(BookFormat::Hardback)
        } else {
            None
        }
    }
}

/// The branches a user has picked as "nearby".
///
/// Persisted as a JSON array of branch names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchSelection {
    branches: BTreeSet<String>,
}

impl BranchSelection {
    pub fn new<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, branch: &str) -> bool {
        self.branches.contains(branch)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.branches.iter().map(String::as_str)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl<S: Into<String>> FromIterator<S> for BranchSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// How `available_copies` is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CopyCounting {
    /// Available copies outside the selected branches.
    #[default]
    Exclusive,
    /// Every available copy, local ones included. Double-counts local copies
    /// in "plus N more"; only kept to reproduce the older page.
    Inclusive,
}

impl fmt::Display for CopyCounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyCounting::Exclusive => f.write_str("exclusive"),
            CopyCounting::Inclusive => f.write_str("inclusive"),
        }
    }
}

/// Per-book counts for one render pass. Borrows the book's records, so it
/// never outlives the catalogue it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityAggregation<'a> {
    pub locally_available_copies: usize,
    pub locally_available_locations: Vec<&'a AvailabilityRecord>,
    pub available_locations: Vec<&'a AvailabilityRecord>,
    pub available_copies: usize,
}

/// Catalogue file: `{"generated_at": ..., "books": [...]}` or a bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub generated_at: Option<String>,
    pub books: Vec<Book>,
}

impl Catalogue {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if value.is_array() {
            return Ok(Catalogue {
                generated_at: None,
                books: serde_json::from_value(value)?,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Accepts RFC 3339 and offset-less ISO 8601 (read as UTC).
    pub fn generated_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.generated_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// 所有至少有一本可借的分館，依名稱排序
    pub fn branches(&self) -> BTreeSet<String> {
        self.books
            .iter()
            .flat_map(|book| book.availability.iter())
            .filter(|record| record.is_available())
            .map(|record| record.location.clone())
            .collect()
    }

    /// The catalogue entry a rendered book came from. `None` when the pass was
    /// built from a different catalogue.
    pub fn book(&self, rendered: &RenderedBook) -> Option<&Book> {
        self.books
            .get(rendered.position)
            .filter(|book| book.id == rendered.id)
    }
}

/// What the page layer needs for one book after a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBook {
    /// Index of the book in `Catalogue::books`. Ids are not guaranteed unique.
    pub position: usize,
    pub id: String,
    pub title: String,
    pub year: String,
    pub has_local_copies: bool,
    pub locally_available_copies: usize,
    pub available_copies: usize,
    pub summary_html: String,
    pub availability_message: String,
    /// One flag per availability record, in catalogue order.
    pub row_flags: Vec<bool>,
}

/// Result of one full render pass, books already in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPass {
    pub selection: BranchSelection,
    pub selected_branch_label: String,
    pub books: Vec<RenderedBook>,
}

impl RenderPass {
    pub fn ordered_ids(&self) -> Vec<&str> {
        self.books.iter().map(|book| book.id.as_str()).collect()
    }
}

/// Transform output handed to the load step.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub catalogue: Catalogue,
    pub pass: RenderPass,
}
