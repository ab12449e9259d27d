//! The module contains the `Entry` type representing one expense in the log.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represent an expense, a single row of the entry log.
///
/// `date` is assigned when the entry is created and never changes. Records
/// stored before entries carried an `id` deserialize with the nil id;
/// [`EntryLog::load`](crate::EntryLog::load) replaces it and writes it back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub cost: f64,
    pub date: DateTime<Utc>,
}

impl Entry {
    pub fn new(name: String, cost: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            cost,
            date,
        }
    }

    /// Case-insensitive substring match on the name. An empty filter matches.
    pub fn matches(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}
