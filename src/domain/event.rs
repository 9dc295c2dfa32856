use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One collected calendar entry.
///
/// Constructed by the normalizer from raw page text and immutable from
/// then on. `end_date` is `None` when the source carried a single date;
/// [`EventRecord::resolved_end`] folds that back to the start date for
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub name: String,
    pub location: Option<String>,
}

impl EventRecord {
    /// A single-day event without a location (presentations pipeline).
    pub fn single(start_date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            start_date,
            end_date: None,
            name: name.into(),
            location: None,
        }
    }

    /// End date as written to the artifact; single-day events reuse the
    /// start date.
    pub fn resolved_end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// Insertion-ordered accumulator for collected records.
///
/// Owned by the pipeline function and returned to the caller; duplicates
/// are allowed here and removed (presentations artifact only) at the sink.
#[derive(Debug, Clone, Default)]
pub struct EventSet {
    records: Vec<EventRecord>,
}

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }
}
