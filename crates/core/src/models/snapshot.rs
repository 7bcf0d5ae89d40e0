use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated total-portfolio-value record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-sorted snapshot history.
///
/// One row per calendar date: a same-day write replaces the existing row
/// instead of inserting a duplicate. The earliest-dated row is the baseline
/// for the period-return percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStore {
    snapshots: Vec<PortfolioSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the row for `date`, keeping the store date-sorted.
    pub fn upsert(&mut self, date: NaiveDate, value: f64) {
        match self
            .snapshots
            .binary_search_by_key(&date, |snapshot| snapshot.date)
        {
            Ok(idx) => self.snapshots[idx].value = value,
            Err(idx) => self.snapshots.insert(idx, PortfolioSnapshot { date, value }),
        }
    }

    /// The earliest-dated snapshot, if any.
    pub fn oldest(&self) -> Option<&PortfolioSnapshot> {
        self.snapshots.first()
    }

    /// The latest-dated snapshot, if any.
    pub fn latest(&self) -> Option<&PortfolioSnapshot> {
        self.snapshots.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.snapshots
            .binary_search_by_key(&date, |snapshot| snapshot.date)
            .ok()
            .map(|idx| self.snapshots[idx].value)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioSnapshot> {
        self.snapshots.iter()
    }
}
