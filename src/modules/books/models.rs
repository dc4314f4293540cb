use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier assigned on creation
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Set once at creation from `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from a validated payload.
    pub fn from_payload(id: String, payload: BookPayload, now: OffsetDateTime) -> Self {
        let finished = payload.page_count == payload.read_page;
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count: payload.page_count,
            read_page: payload.read_page,
            finished,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields. `id`, `inserted_at` and `finished`
    /// are left untouched.
    pub fn apply(&mut self, payload: BookPayload, now: OffsetDateTime) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }

    pub fn summary_view(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Request body for creating or updating a book.
///
/// Every field may be absent on the wire; `name` is checked by validation
/// rather than by the decoder so that a missing name gets the localized
/// rejection message. Page counters default to zero and `reading` to false.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Projection used by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Query string accepted by the list endpoint.
///
/// Filters do NOT combine. Exactly one is applied, chosen by precedence:
/// a non-empty `name`, then `reading`, then `finished`. Boolean filters
/// treat `"1"` as true and any other value as false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// The single filter a list request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    NameContains(String),
    Reading(bool),
    Finished(bool),
    All,
}

impl ListQuery {
    pub fn filter(&self) -> BookFilter {
        fn flag(value: &str) -> bool {
            value == "1"
        }

        match (&self.name, &self.reading, &self.finished) {
            (Some(name), _, _) if !name.is_empty() => BookFilter::NameContains(name.to_lowercase()),
            (_, Some(reading), _) => BookFilter::Reading(flag(reading)),
            (_, _, Some(finished)) => BookFilter::Finished(flag(finished)),
            _ => BookFilter::All,
        }
    }
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::NameContains(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::All => true,
        }
    }
}
