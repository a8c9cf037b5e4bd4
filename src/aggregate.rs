use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::record::Record;

/// What a single merge did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Discarded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_records: usize,
    pub total_currency: u64,
    pub prime_count: usize,
    pub full_access_count: usize,
    pub save_mode_count: usize,
    pub total_items: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines_seen: usize,
    pub records_extracted: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub discarded: usize,
}

impl IngestStats {
    pub fn record(&mut self, outcome: MergeOutcome) {
        self.records_extracted += 1;
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Replaced => self.replaced += 1,
            MergeOutcome::Discarded => self.discarded += 1,
        }
    }

    pub fn absorb(&mut self, other: IngestStats) {
        self.lines_seen += other.lines_seen;
        self.records_extracted += other.records_extracted;
        self.inserted += other.inserted;
        self.replaced += other.replaced;
        self.discarded += other.discarded;
    }
}

/// Keyed account store. Records live in encounter order; the index maps a
/// dedup key to its slot, and a replacement reuses the slot it replaces.
#[derive(Debug, Clone)]
pub struct Aggregator {
    records: Vec<Record>,
    index: HashMap<String, usize>,
    case_sensitive: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_case_sensitivity(true)
    }

    pub fn with_case_sensitivity(case_sensitive: bool) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            case_sensitive,
        }
    }

    /// Upsert-if-better: keep the stored record unless `record` carries strictly more currency.
    pub fn merge(&mut self, record: Record) -> MergeOutcome {
        let key = record.dedup_key(self.case_sensitive);

        match self.index.get(&key) {
            Some(&slot) => {
                if record.currency > self.records[slot].currency {
                    self.records[slot] = record;
                    MergeOutcome::Replaced
                } else {
                    MergeOutcome::Discarded
                }
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                MergeOutcome::Inserted
            }
        }
    }

    pub fn ingest<I, S>(&mut self, lines: I) -> IngestStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = IngestStats::default();
        for line in lines {
            stats.lines_seen += 1;
            if let Some(record) = Record::from_line(line.as_ref()) {
                stats.record(self.merge(record));
            }
        }
        stats
    }

    pub fn merge_all<I>(&mut self, records: I) -> IngestStats
    where
        I: IntoIterator<Item = Record>,
    {
        let mut stats = IngestStats::default();
        for record in records {
            stats.record(self.merge(record));
        }
        stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.records.iter().fold(StatsSnapshot::default(), |mut stats, record| {
            stats.total_records += 1;
            stats.total_currency = stats.total_currency.saturating_add(record.currency);
            stats.total_items = stats.total_items.saturating_add(record.item_count);
            if record.prime_candidate {
                stats.prime_count += 1;
            }
            if record.full_access.is_yes() {
                stats.full_access_count += 1;
            }
            if record.save_mode.is_yes() {
                stats.save_mode_count += 1;
            }
            stats
        })
    }

    /// All records by currency, highest first. Equal amounts keep encounter order.
    pub fn export_ordered(&self) -> Vec<&Record> {
        let mut ordered: Vec<&Record> = self.records.iter().collect();
        ordered.sort_by(|a, b| b.currency.cmp(&a.currency));
        ordered
    }

    pub fn get(&self, identity: &str) -> Option<&Record> {
        let key = if self.case_sensitive {
            identity.to_string()
        } else {
            identity.to_lowercase()
        };
        self.index.get(&key).map(|&slot| &self.records[slot])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregator shared between workers. Each merge runs the
/// read-compare-write sequence under one lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct SharedAggregator {
    inner: Arc<Mutex<Aggregator>>,
}

impl SharedAggregator {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    pub fn merge(&self, record: Record) -> MergeOutcome {
        self.inner.lock().merge(record)
    }

    pub fn merge_all<I>(&self, records: I) -> IngestStats
    where
        I: IntoIterator<Item = Record>,
    {
        let mut stats = IngestStats::default();
        for record in records {
            stats.record(self.merge(record));
        }
        stats
    }

    /// Extraction runs outside the lock; only the merge is serialized.
    pub fn ingest<I, S>(&self, lines: I) -> IngestStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = IngestStats::default();
        for line in lines {
            stats.lines_seen += 1;
            if let Some(record) = Record::from_line(line.as_ref()) {
                stats.record(self.merge(record));
            }
        }
        stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn into_inner(self) -> Aggregator {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}
