//! Ledger engine
//!
//! Owns the logged entries in insertion order. Totals are never cached: every
//! read sums the scaled nutrition of the entries present at that moment, so
//! they cannot drift from the entries after a rescale or removal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::observer::{LedgerEvent, LedgerObserver, SubscriptionId};
use crate::models::{EntryRow, FdcId, FoodItemEntry, FoodRecord, Nutrition};

/// Ledger error types
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Food {0} is already logged")]
    DuplicateEntry(FdcId),

    #[error("Food {0} is not in the log")]
    NotFound(FdcId),

    #[error("Invalid amount {0}: must be a finite number greater than 0")]
    InvalidAmount(f64),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// What `add` does with a food that is already logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateEntry`
    #[default]
    Reject,
    /// Add one more original serving to the existing entry
    Merge,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::Merge => "merge",
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "merge" => Ok(DuplicatePolicy::Merge),
            other => Err(format!("unknown duplicate policy '{}' (expected reject or merge)", other)),
        }
    }
}

/// The running food log
#[derive(Default)]
pub struct LedgerEngine {
    entries: Vec<FoodItemEntry>,
    policy: DuplicatePolicy,
    observers: Vec<(SubscriptionId, Box<dyn LedgerObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("entries", &self.entries)
            .field("policy", &self.policy)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LedgerEngine {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: FdcId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn notify(&mut self, event: &LedgerEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }

    /// Register an observer for subsequent changes
    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, observer));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Log a food at one full serving
    pub fn add(&mut self, record: FoodRecord) -> LedgerResult<FdcId> {
        let id = record.id;

        if let Some(index) = self.position(id) {
            return match self.policy {
                DuplicatePolicy::Reject => {
                    warn!(id, "Rejected duplicate food entry");
                    Err(LedgerError::DuplicateEntry(id))
                }
                DuplicatePolicy::Merge => {
                    let entry = &mut self.entries[index];
                    let amount = entry.amount() + entry.original_serving_size();
                    if !amount.is_finite() {
                        warn!(id, amount, "Rejected duplicate merge");
                        return Err(LedgerError::InvalidAmount(amount));
                    }
                    entry.set_amount(amount);
                    let row = entry.row();
                    info!(id, amount, "Merged duplicate food entry");

                    let event = LedgerEvent::Rescaled { row, totals: self.totals() };
                    self.notify(&event);
                    Ok(id)
                }
            };
        }

        let entry = FoodItemEntry::from_record(record);
        info!(
            id,
            description = %entry.record.description,
            serving_size = entry.original_serving_size(),
            unit = %entry.serving_size_unit,
            "Logged food"
        );
        self.entries.push(entry);

        let event = LedgerEvent::Added { id, totals: self.totals() };
        self.notify(&event);
        Ok(id)
    }

    /// Remove a logged food; unknown ids leave the log untouched
    pub fn remove(&mut self, id: FdcId) -> LedgerResult<()> {
        let Some(index) = self.position(id) else {
            warn!(id, "Remove ignored: food not in log");
            return Err(LedgerError::NotFound(id));
        };

        let entry = self.entries.remove(index);
        info!(id, description = %entry.record.description, "Removed food");

        let event = LedgerEvent::Removed { id, totals: self.totals() };
        self.notify(&event);
        Ok(())
    }

    /// Change the amount eaten; the original serving size is kept as the baseline
    pub fn rescale(&mut self, id: FdcId, new_amount: f64) -> LedgerResult<EntryRow> {
        if !new_amount.is_finite() || new_amount <= 0.0 {
            warn!(id, amount = new_amount, "Rejected rescale");
            return Err(LedgerError::InvalidAmount(new_amount));
        }

        let Some(index) = self.position(id) else {
            warn!(id, "Rescale ignored: food not in log");
            return Err(LedgerError::NotFound(id));
        };

        let entry = &mut self.entries[index];
        entry.set_amount(new_amount);
        let row = entry.row();
        info!(id, amount = new_amount, factor = entry.scaling_factor(), "Rescaled food");

        let event = LedgerEvent::Rescaled { row: row.clone(), totals: self.totals() };
        self.notify(&event);
        Ok(row)
    }

    /// Drop every entry; returns how many were logged
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        info!(count, "Cleared food log");
        self.notify(&LedgerEvent::Cleared);
        count
    }

    /// Sum of scaled nutrition over the current entries
    pub fn totals(&self) -> Nutrition {
        self.entries.iter().map(FoodItemEntry::scaled_nutrition).sum()
    }

    /// Rows in insertion order
    pub fn entries(&self) -> Vec<EntryRow> {
        self.entries.iter().map(FoodItemEntry::row).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodItemEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: FdcId) -> Option<&FoodItemEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The raw upstream record, for the detail view
    pub fn details(&self, id: FdcId) -> Option<&FoodRecord> {
        self.get(id).map(|e| &e.record)
    }
}
