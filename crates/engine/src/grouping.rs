//! Date-grouped view of the entry log.
//!
//! The view is a pure function of the entries and the filter text; it is
//! rebuilt from scratch whenever it is asked for and never stored.
use core::fmt;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::Entry;

/// Calendar day an entry is bucketed under.
///
/// Displays as `DD/M/YYYY`: the day is zero-padded to two digits, the month
/// is not (`05/1/2024`, `01/12/2023`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Key of `entry` as seen from `timezone`.
    pub fn of(entry: &Entry, timezone: &Tz) -> Self {
        Self(entry.date.with_timezone(timezone).date_naive())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}/{}", self.0.day(), self.0.month(), self.0.year())
    }
}

/// Entries sharing one [`DateKey`], in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct DateGroup {
    pub key: DateKey,
    pub entries: Vec<Entry>,
}

impl DateGroup {
    /// Sum of the costs in the group.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.cost).sum()
    }
}

/// Filtered entries bucketed by day, most recent day first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupedView {
    groups: Vec<DateGroup>,
}

impl GroupedView {
    /// Builds the view of `entries` whose name contains `filter`
    /// (case-insensitive), keyed by calendar day in `timezone`.
    pub fn build(entries: &[Entry], filter: &str, timezone: &Tz) -> Self {
        let mut buckets: BTreeMap<DateKey, Vec<Entry>> = BTreeMap::new();
        for entry in entries.iter().filter(|entry| entry.matches(filter)) {
            buckets
                .entry(DateKey::of(entry, timezone))
                .or_default()
                .push(entry.clone());
        }

        let groups = buckets
            .into_iter()
            .rev()
            .map(|(key, entries)| DateGroup { key, entries })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[DateGroup] {
        &self.groups
    }

    pub fn keys(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.groups.iter().map(|group| group.key)
    }

    /// Number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a GroupedView {
    type Item = &'a DateGroup;
    type IntoIter = std::slice::Iter<'a, DateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
