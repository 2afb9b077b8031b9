//! MCP Tool definitions and handlers
//!
//! Exposes the single `get_cocktail` tool: its catalog entry and its invocation.

use std::sync::Arc;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::cocktaildb::client::CocktailDbClient;
use crate::cocktaildb::format::{format_search_results, no_results_message};
use crate::error::{McpError, Result, ValidationError};
use crate::mcp::types::{CallToolResult, Tool};

/// Name of the cocktail search tool
pub const GET_COCKTAIL: &str = "get_cocktail";

const GET_COCKTAIL_DESCRIPTION: &str = "Search for cocktail recipes by name";

/// Prefix of every failure reported by `get_cocktail`
const SEARCH_ERROR_PREFIX: &str = "Error searching for cocktail";

/// Arguments accepted by `get_cocktail`
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchArguments {
    /// Cocktail name to search for
    pub name: String,
}

impl SearchArguments {
    /// Validate untyped tool arguments
    pub fn from_value(args: Value) -> std::result::Result<Self, ValidationError> {
        serde_json::from_value(args).map_err(|e| ValidationError::InvalidArguments {
            message: e.to_string(),
        })
    }
}

/// Tool handler
pub struct ToolHandler {
    cocktail_client: Arc<CocktailDbClient>,

    /// Catalog, built once
    tools: Vec<Tool>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(cocktail_client: Arc<CocktailDbClient>) -> Self {
        Self {
            cocktail_client,
            tools: vec![tool_def(
                GET_COCKTAIL,
                GET_COCKTAIL_DESCRIPTION,
                search_arguments_schema(),
            )],
        }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.clone()
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        match name {
            GET_COCKTAIL => self.handle_get_cocktail(args).await,
            _ => {
                let err = McpError::UnknownTool {
                    name: name.to_string(),
                };
                tracing::warn!(tool = name, "Rejected call to unknown tool");
                CallToolResult::error(err.to_string())
            }
        }
    }

    // ==================== Tool Handlers ====================

    async fn handle_get_cocktail(&self, args: Value) -> CallToolResult {
        match self.search_cocktails(args).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                tracing::error!(error = %e, "Error in {} tool", GET_COCKTAIL);
                search_error(e.to_string())
            }
        }
    }

    async fn search_cocktails(&self, args: Value) -> Result<String> {
        let args = SearchArguments::from_value(args)?;
        tracing::info!(name = %args.name, "Searching for cocktail");

        let text = match self.cocktail_client.search_by_name(&args.name).await? {
            Some(drinks) => format_search_results(&args.name, &drinks),
            None => no_results_message(&args.name),
        };

        Ok(text)
    }
}

/// Error envelope for a failed `get_cocktail` invocation
pub fn search_error(detail: impl Into<String>) -> CallToolResult {
    let detail = detail.into();
    let detail = if detail.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        detail
    };
    CallToolResult::error(format!("{}: {}", SEARCH_ERROR_PREFIX, detail))
}

// ==================== Schema Definitions ====================

fn tool_def(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn search_arguments_schema() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.meta_schema = None;
            s.inline_subschemas = true;
        })
        .into_generator();
    let mut root = generator.into_root_schema_for::<SearchArguments>();

    // Type-level title and doc comment are not part of the tool's input contract
    root.schema.metadata = None;

    serde_json::to_value(root).unwrap_or_default()
}
