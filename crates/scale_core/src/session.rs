use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use ulid::{Generator, Ulid};

use crate::catalog::{Catalog, CatalogError};
use crate::engine::{self, ConversionResult};
use crate::good::{Color, Good, Mode, Unit};
use crate::history::{Transaction, TransactionLog};

/// Every readable surface of a session at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub catalog: Vec<Good>,
    pub history: Vec<Transaction>,
    pub active_good: Option<Good>,
    pub mode: Mode,
    pub pending_input: String,
    pub live_result: Option<ConversionResult>,
}

/// Applies user intents to the catalog, the transaction log and the
/// calculator state. Display values are derived on demand, never cached.
pub struct Session {
    catalog: Catalog,
    history: TransactionLog,
    active: Option<Ulid>,
    mode: Mode,
    pending: String,
    ids: Generator,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        let active = catalog.first().map(|good| good.id);

        Self {
            catalog,
            history: TransactionLog::new(),
            active,
            mode: Mode::default(),
            pending: String::new(),
            ids: Generator::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn catalog(&self) -> &[Good] {
        self.catalog.list()
    }

    pub fn find_good(&self, query: &str) -> Option<&Good> {
        self.catalog.find(query)
    }

    pub fn history(&self) -> &[Transaction] {
        self.history.list()
    }

    pub fn active_good(&self) -> Option<&Good> {
        self.active.and_then(|id| self.catalog.get(id))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_input(&self) -> &str {
        &self.pending
    }

    pub fn live_result(&self) -> Option<ConversionResult> {
        let good = self.active_good()?;
        engine::convert(good, self.mode, &self.pending)
    }

    pub fn can_commit(&self) -> bool {
        matches!(self.live_result(), Some(result) if result.value > 0.0)
    }

    /// Makes `id` the active good. Unknown ids leave the selection alone.
    #[tracing::instrument(skip(self))]
    pub fn select_good(&mut self, id: Ulid) -> bool {
        if self.catalog.get(id).is_none() {
            info!("No good with id {}, keeping current selection.", id);
            return false;
        }

        self.active = Some(id);
        self.pending.clear();
        true
    }

    #[tracing::instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.pending.clear();
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn set_pending_input(&mut self, raw: &str) {
        self.pending = raw.to_string();
    }

    /// Records the live conversion in history and clears the pending input.
    ///
    /// Returns `None`, leaving everything untouched, when there is nothing
    /// valid to commit.
    #[tracing::instrument(skip(self), fields(input = %self.pending))]
    pub fn commit_conversion(&mut self) -> Option<Transaction> {
        let (good_name, good_color, result) = {
            let good = match self.active_good() {
                Some(good) => good,
                None => {
                    info!("No active good, nothing to commit.");
                    return None;
                }
            };

            match engine::convert(good, self.mode, &self.pending) {
                Some(result) if result.value > 0.0 => (good.name.clone(), good.color, result),
                _ => {
                    info!("Pending input is not a positive amount, nothing to commit.");
                    return None;
                }
            }
        };
        let input_value = engine::parse_amount(&self.pending)?;

        let tx = Transaction {
            id: self.ids.generate().unwrap_or_else(|_| Ulid::new()),
            good_name,
            good_color,
            mode: self.mode,
            input_value,
            input_unit: result.input_unit,
            result_value: result.value,
            result_unit: result.output_unit,
            timestamp: Utc::now(),
        };
        debug!(id = %tx.id, good = %tx.good_name, "committed conversion");

        self.history.record(tx.clone());
        self.pending.clear();

        Some(tx)
    }

    pub fn clear_history(&mut self) {
        debug!(entries = self.history.len(), "clearing history");
        self.history.clear();
    }

    #[tracing::instrument(skip(self))]
    pub fn add_good(
        &mut self,
        name: &str,
        price_per_unit: f64,
        unit: Unit,
        color: Color,
    ) -> Result<Good, CatalogError> {
        let good = self
            .catalog
            .add(name, price_per_unit, unit, color)
            .map_err(|e| {
                info!("Rejected new good: {}.", e);
                e
            })?;

        if self.active_good().is_none() {
            self.active = Some(good.id);
            self.pending.clear();
        }

        Ok(good)
    }

    /// Returns `Ok(false)` when no good has the given id.
    #[tracing::instrument(skip(self))]
    pub fn update_good_price(&mut self, id: Ulid, price: f64) -> Result<bool, CatalogError> {
        self.catalog.update_price(id, price).map_err(|e| {
            info!("Rejected price update: {}.", e);
            e
        })
    }

    /// Removes a good without asking. Confirmation belongs to the caller.
    #[tracing::instrument(skip(self))]
    pub fn remove_good(&mut self, id: Ulid) -> Option<Good> {
        let removed = self.catalog.remove(id)?;

        if self.active == Some(id) {
            self.active = self.catalog.first().map(|good| good.id);
            self.pending.clear();
        }

        Some(removed)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            catalog: self.catalog().to_vec(),
            history: self.history().to_vec(),
            active_good: self.active_good().cloned(),
            mode: self.mode,
            pending_input: self.pending.clone(),
            live_result: self.live_result(),
        }
    }
}
