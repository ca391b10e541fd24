//! Food Log status tool
//!
//! Runtime status plus the usage guide served to MCP clients.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Food logging instructions for AI assistants
pub const LOGGING_INSTRUCTIONS: &str = r#"
# Food Log Instructions

Food Log keeps a running list of foods eaten in this session and totals their
energy, protein, fat and carbohydrates. Nothing is kept between sessions.

## Setup

A FoodData Central API key is required for searching. Get one for free at
https://fdc.nal.usda.gov/api-key-signup.html and call `set_api_key` once; the
key is saved and reused on the next start.

## Logging a food

1. `search_foods` with at least 3 characters, e.g. `{"query": "greek yogurt"}`.
   - `status: "results"` lists candidates with their FDC id and nutrition per
     reported serving (per 100 g when the food reports no serving).
   - `status: "too_short"` means the query needs more characters.
   - `status: "superseded"` means a newer search replaced this one; use the
     newer result.
2. `add_food` with the chosen `fdc_id`. The food is logged at one full
   serving. Adding the same food twice is rejected unless the server runs with
   `FOODLOG_DUPLICATE_POLICY=merge`, which adds another serving instead.
3. `rescale_food` with `fdc_id` and `amount` (same unit as the serving, must
   be greater than 0) when the user ate more or less than one serving. All
   four nutrients scale by amount / original serving size.

## Reviewing

- `list_entries`: every logged food with scaled values and the totals.
- `get_totals`: totals only.
- `view_food_details`: the full upstream FoodData Central record.
- `remove_food` / `clear_log`: take foods off the list.

Every response carries `raw` values at full precision and `display` strings
rounded to 2 decimals. Show the display strings to the user.

## Energy values

Energy is read from nutrient 1008 (kcal) and falls back to 2047 then 2048
(Atwater energy) for foods that only report those. Nutrients a food does not
report count as 0.
"#;

/// Runtime status of the Food Log service
#[derive(Debug, Clone, Serialize)]
pub struct FoodLogStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub key_path: String,
    pub api_key_configured: bool,
    pub logged_entries: usize,
    pub duplicate_policy: &'static str,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Collects runtime information for the status tool
pub struct StatusTracker {
    start_time: Instant,
    key_path: PathBuf,
}

impl StatusTracker {
    pub fn new(key_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            key_path,
        }
    }

    pub fn get_status(
        &self,
        api_key_configured: bool,
        logged_entries: usize,
        duplicate_policy: &'static str,
    ) -> FoodLogStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        FoodLogStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            key_path: self.key_path.display().to_string(),
            api_key_configured,
            logged_entries,
            duplicate_policy,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
