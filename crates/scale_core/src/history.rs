use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::good::{Color, Measure, Mode};

/// Maximum number of transactions kept in the log.
pub const HISTORY_LIMIT: usize = 50;

/// A committed conversion. The good's display attributes are copied at
/// commit time so later catalog edits do not reach back into history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Ulid,
    pub good_name: String,
    pub good_color: Color,
    pub mode: Mode,
    pub input_value: f64,
    pub input_unit: Measure,
    pub result_value: f64,
    pub result_unit: Measure,
    pub timestamp: DateTime<Utc>,
}

/// Recent transactions, newest first.
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tx: Transaction) {
        self.entries.insert(0, tx);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
