//! Food Log MCP Server Implementation
//!
//! Exposes search and the food log as MCP tools. This is the presentation
//! layer: it forwards each call into the ledger and renders JSON.

use std::sync::{Arc, Mutex as StdMutex};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::keystore::ApiKeyStore;
use crate::ledger::{DuplicatePolicy, LedgerEngine, TracingObserver};
use crate::search::{FdcClient, SearchSession};
use crate::tools::ledger::{self as ledger_tools, SharedLedger};
use crate::tools::search::{self as search_tools, CandidatePool};
use crate::tools::status::StatusTracker;

/// Food Log MCP Service
#[derive(Clone)]
pub struct FoodLogService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    ledger: SharedLedger,
    session: Arc<SearchSession<FdcClient>>,
    candidates: Arc<CandidatePool>,
    key_store: ApiKeyStore,
    duplicate_policy: DuplicatePolicy,
    tool_router: ToolRouter<FoodLogService>,
}

impl FoodLogService {
    pub fn new(config: &Config, key_store: ApiKeyStore, client: FdcClient) -> Self {
        let mut ledger = LedgerEngine::new(config.duplicate_policy);
        ledger.subscribe(Box::new(TracingObserver));

        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(key_store.path().to_path_buf()))),
            ledger: Arc::new(StdMutex::new(ledger)),
            session: Arc::new(SearchSession::new(client, config.search)),
            candidates: Arc::new(CandidatePool::default()),
            key_store,
            duplicate_policy: config.duplicate_policy,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Food name to search for (at least 3 characters)
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodIdParams {
    /// FoodData Central id of the food
    pub fdc_id: u64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RescaleFoodParams {
    /// FoodData Central id of a logged food
    pub fdc_id: u64,
    /// Amount eaten, in the food's serving unit (must be greater than 0)
    pub amount: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetApiKeyParams {
    /// FoodData Central API key
    pub api_key: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FoodLogService {
    // --- Status ---

    #[tool(description = "Get the current status of the Food Log service including build info, API key state, and process information")]
    async fn foodlog_status(&self) -> Result<CallToolResult, McpError> {
        let logged_entries = ledger_tools::get_totals(&self.ledger)
            .map_err(|e| McpError::internal_error(e, None))?
            .entry_count;
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(
            self.session.provider().has_api_key(),
            logged_entries,
            self.duplicate_policy.as_str(),
        );
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for searching and logging foods. Call this when starting a food logging session.")]
    fn logging_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::LOGGING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(LOGGING_INSTRUCTIONS)]))
    }

    #[tool(description = "Save the FoodData Central API key used for searching")]
    fn set_api_key(&self, Parameters(p): Parameters<SetApiKeyParams>) -> Result<CallToolResult, McpError> {
        let result = search_tools::set_api_key(&self.key_store, self.session.provider(), &p.api_key)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Search ---

    #[tool(description = "Search FoodData Central for foods. Returns candidates with their fdc_id for add_food.")]
    async fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = search_tools::search_foods(&self.session, &self.candidates, &p.query)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Food Log ---

    #[tool(description = "Add a food from any earlier search results to the log at one full serving")]
    fn add_food(&self, Parameters(p): Parameters<FoodIdParams>) -> Result<CallToolResult, McpError> {
        let record = self.candidates.get(p.fdc_id).ok_or_else(|| {
            McpError::invalid_params(
                format!("Food {} is not in the search results; call search_foods first", p.fdc_id),
                None,
            )
        })?;
        let result = ledger_tools::add_food(&self.ledger, record)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove a food from the log")]
    fn remove_food(&self, Parameters(p): Parameters<FoodIdParams>) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::remove_food(&self.ledger, p.fdc_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Change the amount eaten of a logged food. Nutrients scale by amount / original serving size. An id that is not logged returns success=false with a warning.")]
    fn rescale_food(&self, Parameters(p): Parameters<RescaleFoodParams>) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::rescale_food(&self.ledger, p.fdc_id, p.amount)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get total energy, protein, fat and carbs over all logged foods")]
    fn get_totals(&self) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::get_totals(&self.ledger).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List logged foods in the order they were added, with scaled nutrients and totals")]
    fn list_entries(&self) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::list_entries(&self.ledger).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the full FoodData Central record of a logged food")]
    fn view_food_details(&self, Parameters(p): Parameters<FoodIdParams>) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::view_food_details(&self.ledger, p.fdc_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(record) => json_result(&record),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Food not in log", "fdc_id": {}}}"#,
                p.fdc_id
            ))])),
        }
    }

    #[tool(description = "Remove every food from the log")]
    fn clear_log(&self) -> Result<CallToolResult, McpError> {
        let result = ledger_tools::clear_log(&self.ledger).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FoodLogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "foodlog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Food Log".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Food Log - FoodData Central search with running nutrient totals. \
                 Call logging_instructions first. \
                 Setup: set_api_key. Search: search_foods. \
                 Log: add_food/remove_food/rescale_food/clear_log. \
                 Review: get_totals/list_entries/view_food_details. \
                 Status: foodlog_status."
                    .into(),
            ),
        }
    }
}
