//! Month-bucketed calendar aggregation.
//!
//! A [`CalendarAggregator`] is created per run. It takes [`EventRecord`]s
//! one at a time, drops records whose dedup key was already seen in the
//! same month, and on finalization sorts each month by day. The result is a
//! [`CalendarIndex`] that always holds all twelve months.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::event::{Category, EventRecord};
use crate::month::Month;

/// Lifecycle of an aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Nothing ingested yet.
    Empty,
    /// Records have been ingested since the last finalization.
    Accumulating,
    /// Every bucket is sorted.
    Finalized,
}

/// Outcome of ingesting one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Added,
    /// Same display date and title already present in that month.
    Duplicate,
}

/// Collects records into twelve deduplicated month buckets.
#[derive(Debug, Clone)]
pub struct CalendarAggregator {
    buckets: [Vec<EventRecord>; 12],
    seen: [HashSet<(String, String)>; 12],
    state: AggregatorState,
}

impl Default for CalendarAggregator {
    fn default() -> Self {
        Self {
            buckets: Default::default(),
            seen: Default::default(),
            state: AggregatorState::Empty,
        }
    }
}

impl CalendarAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    /// Number of records currently held across all months.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a record to its month unless it duplicates one already there.
    pub fn ingest(&mut self, record: EventRecord) -> Ingest {
        let index = record.month().index();
        if !self.seen[index].insert(record.dedup_key()) {
            debug!(
                month = %record.month(),
                date = record.display_date(),
                title = record.title(),
                "dropping duplicate event"
            );
            return Ingest::Duplicate;
        }

        trace!(month = %record.month(), title = record.title(), "event added");
        self.buckets[index].push(record);
        self.state = AggregatorState::Accumulating;
        Ingest::Added
    }

    /// Ingests every record of a (possibly lazy) sequence.
    ///
    /// Returns how many records were added.
    pub fn ingest_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = EventRecord>,
    {
        records
            .into_iter()
            .map(|record| self.ingest(record))
            .filter(|outcome| *outcome == Ingest::Added)
            .count()
    }

    /// Sorts every bucket by day.
    ///
    /// The sort is stable, so same-day events keep their insertion order and
    /// calling this again on sorted buckets changes nothing.
    pub fn finalize(&mut self) {
        if self.state == AggregatorState::Finalized {
            return;
        }
        for bucket in &mut self.buckets {
            bucket.sort_by_key(EventRecord::day);
        }
        self.state = AggregatorState::Finalized;
    }

    /// Finalizes and hands the buckets over as a [`CalendarIndex`].
    pub fn into_index(mut self) -> CalendarIndex {
        self.finalize();
        CalendarIndex {
            buckets: self.buckets,
        }
    }
}

/// The twelve-month result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarIndex {
    buckets: [Vec<EventRecord>; 12],
}

impl CalendarIndex {
    /// Events of one month, ordered by day.
    pub fn month(&self, month: Month) -> &[EventRecord] {
        &self.buckets[month.index()]
    }

    /// All twelve months in calendar order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Month, &[EventRecord])> {
        Month::ALL
            .into_iter()
            .map(move |month| (month, self.month(month)))
    }

    /// All events in month then day order.
    pub fn events(&self) -> impl Iterator<Item = &EventRecord> {
        self.buckets.iter().flatten()
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of events of a category across all months.
    pub fn count(&self, category: Category) -> usize {
        self.events().filter(|e| e.category() == category).count()
    }
}

impl Serialize for CalendarIndex {
    /// Serializes as an object keyed by lowercase month name, January first.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (month, events) in self.iter() {
            map.serialize_entry(month.key(), events)?;
        }
        map.end()
    }
}
