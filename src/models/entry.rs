//! Entry model
//!
//! An entry is a single dated, tagged expense record. The entry's own name
//! acts as an implicit tag: queries match against the effective label set,
//! which is the tag list plus the name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Unique identifier for an entry, assigned sequentially by the store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw id value
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, stable until deletion
    pub id: EntryId,

    /// Name of the expense (non-empty)
    pub name: String,

    /// Cost of the expense
    pub cost: Money,

    /// Date of expenditure (day granularity)
    pub date: NaiveDate,

    /// Free-form labels; duplicates carry no meaning
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry {
    /// Create a new entry
    pub fn new(
        id: EntryId,
        name: impl Into<String>,
        cost: Money,
        date: NaiveDate,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            date,
            tags,
        }
    }

    /// Check whether `label` is in the effective label set (tags plus name)
    ///
    /// Matching is case-sensitive, exact string equality.
    pub fn has_label(&self, label: &str) -> bool {
        self.name == label || self.tags.iter().any(|t| t == label)
    }

    /// Check whether any of `labels` is in the effective label set
    pub fn has_any_label<S: AsRef<str>>(&self, labels: impl IntoIterator<Item = S>) -> bool {
        labels.into_iter().any(|l| self.has_label(l.as_ref()))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.name,
            self.cost
        )
    }
}
