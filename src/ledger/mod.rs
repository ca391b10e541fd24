//! Ledger module
//!
//! The running food log and its change notifications.

pub mod engine;
pub mod observer;

pub use engine::{DuplicatePolicy, LedgerEngine, LedgerError, LedgerResult};
pub use observer::{LedgerEvent, LedgerObserver, SubscriptionId, TracingObserver};
