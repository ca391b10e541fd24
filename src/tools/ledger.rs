//! Food log MCP tools
//!
//! Validation and response shaping between tool parameters and the ledger.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::ledger::{LedgerEngine, LedgerError};
use crate::models::{EntryRow, FdcId, FoodRecord, Nutrition};
use crate::nutrition::{DisplayRow, DisplayTotals};

/// The ledger as shared by the MCP service
pub type SharedLedger = Arc<Mutex<LedgerEngine>>;

fn lock(ledger: &SharedLedger) -> Result<MutexGuard<'_, LedgerEngine>, String> {
    ledger.lock().map_err(|_| "Food log lock poisoned".to_string())
}

/// Totals with full precision and two-decimal display strings
#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub entry_count: usize,
    pub raw: Nutrition,
    pub display: DisplayTotals,
}

impl TotalsView {
    fn of(ledger: &LedgerEngine) -> Self {
        let raw = ledger.totals();
        Self {
            entry_count: ledger.len(),
            display: DisplayTotals::from(&raw),
            raw,
        }
    }
}

/// One entry with its display strings
#[derive(Debug, Serialize)]
pub struct EntryView {
    #[serde(flatten)]
    pub row: EntryRow,
    pub display: DisplayRow,
}

impl From<EntryRow> for EntryView {
    fn from(row: EntryRow) -> Self {
        Self {
            display: DisplayRow::from(&row),
            row,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddFoodResponse {
    pub id: FdcId,
    pub entry: EntryView,
    pub totals: TotalsView,
}

#[derive(Debug, Serialize)]
pub struct RemoveFoodResponse {
    pub success: bool,
    pub id: FdcId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub totals: TotalsView,
}

#[derive(Debug, Serialize)]
pub struct RescaleFoodResponse {
    pub success: bool,
    pub id: FdcId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub totals: TotalsView,
}

#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntryView>,
    pub totals: TotalsView,
}

#[derive(Debug, Serialize)]
pub struct ClearLogResponse {
    pub cleared: usize,
    pub totals: TotalsView,
}

/// Log a selected candidate
pub fn add_food(ledger: &SharedLedger, record: FoodRecord) -> Result<AddFoodResponse, String> {
    let mut ledger = lock(ledger)?;
    let id = ledger.add(record).map_err(|e| e.to_string())?;
    let row = ledger
        .get(id)
        .map(|e| e.row())
        .ok_or_else(|| format!("Food {} missing after add", id))?;

    Ok(AddFoodResponse {
        id,
        entry: row.into(),
        totals: TotalsView::of(&ledger),
    })
}

/// Remove a logged food; an unknown id is a warning, not a failure
pub fn remove_food(ledger: &SharedLedger, id: FdcId) -> Result<RemoveFoodResponse, String> {
    let mut ledger = lock(ledger)?;
    let (success, warning) = match ledger.remove(id) {
        Ok(()) => (true, None),
        Err(e @ LedgerError::NotFound(_)) => (false, Some(e.to_string())),
        Err(e) => return Err(e.to_string()),
    };

    Ok(RemoveFoodResponse {
        success,
        id,
        warning,
        totals: TotalsView::of(&ledger),
    })
}

/// Change how much of a logged food was eaten; an unknown id is a warning,
/// a bad amount is a failure
pub fn rescale_food(ledger: &SharedLedger, id: FdcId, amount: f64) -> Result<RescaleFoodResponse, String> {
    let mut ledger = lock(ledger)?;
    let (entry, warning) = match ledger.rescale(id, amount) {
        Ok(row) => (Some(EntryView::from(row)), None),
        Err(e @ LedgerError::NotFound(_)) => (None, Some(e.to_string())),
        Err(e) => return Err(e.to_string()),
    };

    Ok(RescaleFoodResponse {
        success: entry.is_some(),
        id,
        entry,
        warning,
        totals: TotalsView::of(&ledger),
    })
}

pub fn get_totals(ledger: &SharedLedger) -> Result<TotalsView, String> {
    let ledger = lock(ledger)?;
    Ok(TotalsView::of(&ledger))
}

pub fn list_entries(ledger: &SharedLedger) -> Result<ListEntriesResponse, String> {
    let ledger = lock(ledger)?;
    Ok(ListEntriesResponse {
        entries: ledger.entries().into_iter().map(EntryView::from).collect(),
        totals: TotalsView::of(&ledger),
    })
}

/// Raw upstream record of a logged food
pub fn view_food_details(ledger: &SharedLedger, id: FdcId) -> Result<Option<FoodRecord>, String> {
    let ledger = lock(ledger)?;
    Ok(ledger.details(id).cloned())
}

pub fn clear_log(ledger: &SharedLedger) -> Result<ClearLogResponse, String> {
    let mut ledger = lock(ledger)?;
    let cleared = ledger.clear();
    Ok(ClearLogResponse {
        cleared,
        totals: TotalsView::of(&ledger),
    })
}
