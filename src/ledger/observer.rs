//! Ledger change notifications
//!
//! Observers are called synchronously after a change has been applied, in
//! the order they subscribed. Rejected operations emit nothing.

use serde::Serialize;
use tracing::debug;

use crate::models::{EntryRow, FdcId, Nutrition};

/// A change applied to the ledger, with the totals after the change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    Added { id: FdcId, totals: Nutrition },
    Removed { id: FdcId, totals: Nutrition },
    Rescaled { row: EntryRow, totals: Nutrition },
    Cleared,
}

impl LedgerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Added { .. } => "added",
            LedgerEvent::Removed { .. } => "removed",
            LedgerEvent::Rescaled { .. } => "rescaled",
            LedgerEvent::Cleared => "cleared",
        }
    }
}

/// Receives ledger events
pub trait LedgerObserver: Send {
    fn on_event(&mut self, event: &LedgerEvent);
}

/// Handle returned by `LedgerEngine::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Logs every event at debug level
#[derive(Debug, Default)]
pub struct TracingObserver;

impl LedgerObserver for TracingObserver {
    fn on_event(&mut self, event: &LedgerEvent) {
        match event {
            LedgerEvent::Added { id, totals } | LedgerEvent::Removed { id, totals } => {
                debug!(event = event.name(), id, energy = totals.energy, "Ledger changed");
            }
            LedgerEvent::Rescaled { row, totals } => {
                debug!(
                    event = event.name(),
                    id = row.id,
                    amount = row.amount,
                    energy = totals.energy,
                    "Ledger changed"
                );
            }
            LedgerEvent::Cleared => debug!(event = event.name(), "Ledger changed"),
        }
    }
}
