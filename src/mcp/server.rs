//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::cocktaildb::client::CocktailDbClient;
use crate::error::{CocktailMcpError, McpError, Result};
use crate::mcp::tools::{search_error, ToolHandler};
use crate::mcp::types::*;

/// MCP Server info
pub const SERVER_NAME: &str = "cocktail-api-server";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for CocktailDB
pub struct McpServer {
    /// Tool handler, shared with per-call tasks
    tool_handler: Arc<ToolHandler>,

    /// Whether initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(cocktail_client: Arc<CocktailDbClient>) -> Self {
        Self {
            tool_handler: Arc::new(ToolHandler::new(cocktail_client)),
            initialized: false,
        }
    }

    /// Whether the client has sent `notifications/initialized`
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server on stdio
    pub async fn run_stdio(&mut self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`
    ///
    /// Returns when the reader reaches end of input. A malformed line is answered
    /// with a parse error; only I/O failures on the streams end the loop early.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(line).await,
                Err(e) => {
                    tracing::warn!(error = %e, "Message is not valid UTF-8");
                    Some(JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(e.to_string()),
                    ))
                }
            };

            // Notifications get no response
            if let Some(response) = response {
                write_response(&mut writer, &response).await?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    ///
    /// Returns `None` for notifications.
    pub async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        // Try to parse as request
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        match self.dispatch(&request).await {
            Ok(response) => Some(response),
            Err(e) => Some(failure_response(request.id, &e)),
        }
    }

    async fn dispatch(&mut self, request: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let id = request.id.clone();
        let response = match request.method.as_str() {
            methods::INITIALIZE => JsonRpcResponse::success(id, self.handle_initialize(request)?),
            methods::PING => JsonRpcResponse::success(id, serde_json::json!({})),
            methods::LIST_TOOLS => JsonRpcResponse::success(id, self.handle_list_tools()?),
            methods::CALL_TOOL => {
                let result = self.handle_call_tool(request).await;
                JsonRpcResponse::success(id, serde_json::to_value(result)?)
            }
            _ => JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method)),
        };

        Ok(response)
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            methods::INITIALIZED => {
                self.initialized = true;
                tracing::info!("Client initialized");
            }
            other => tracing::debug!(method = other, "Ignoring notification"),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, request: &JsonRpcRequest) -> Result<Value> {
        if let Some(params) = request
            .params
            .clone()
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
        {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Initializing session"
            );
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.tool_handler.list_tools(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request
    ///
    /// The call runs on its own task so a panic in it becomes an error envelope.
    async fn handle_call_tool(&self, request: &JsonRpcRequest) -> CallToolResult {
        let params: CallToolParams = match request.params.as_ref() {
            Some(p) => match serde_json::from_value(p.clone()) {
                Ok(params) => params,
                Err(e) => {
                    return CallToolResult::error(
                        McpError::ProtocolError {
                            message: format!("Invalid tool parameters: {}", e),
                        }
                        .to_string(),
                    );
                }
            },
            None => {
                return CallToolResult::error(
                    McpError::ProtocolError {
                        message: "Missing tool parameters".to_string(),
                    }
                    .to_string(),
                );
            }
        };

        let handler = Arc::clone(&self.tool_handler);
        let task = tokio::spawn(async move {
            handler.call_tool(&params.name, params.arguments).await
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Tool invocation aborted");
                search_error("")
            }
        }
    }
}

/// Internal-error response for a request whose handling failed
fn failure_response(id: Option<RequestId>, err: &CocktailMcpError) -> JsonRpcResponse {
    tracing::error!(error = %err, "Error handling message");
    JsonRpcResponse::error(id, JsonRpcError::internal_error(err.to_string()))
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut response_str = serde_json::to_string(response)?;
    response_str.push('\n');
    writer.write_all(response_str.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn server() -> McpServer {
        let config = Config::default()
            .with_api_base_url("http://127.0.0.1:9")
            .unwrap();
        McpServer::new(Arc::new(CocktailDbClient::new(&config).unwrap()))
    }

    fn handle(server: &mut McpServer, message: Value) -> Option<Value> {
        tokio_test::block_on(server.handle_message(&message.to_string()))
            .map(|r| serde_json::to_value(r).unwrap())
    }

    #[test]
    fn test_server_info() {
        assert_eq!(SERVER_NAME, "cocktail-api-server");
    }

    #[test]
    fn test_initialize() {
        let mut server = server();
        let response = handle(
            &mut server,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "clientInfo": { "name": "test-client", "version": "1.0.0" },
                    "capabilities": {}
                }
            }),
        )
        .unwrap();

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], MCP_VERSION);
        assert_eq!(response["result"]["serverInfo"]["name"], SERVER_NAME);
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_initialized_notification() {
        let mut server = server();
        let response = handle(
            &mut server,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        );
        assert!(response.is_none());
        assert!(server.is_initialized());
    }

    #[test]
    fn test_list_tools() {
        let mut server = server();
        let response = handle(
            &mut server,
            json!({ "jsonrpc": "2.0", "id": "t", "method": "tools/list" }),
        )
        .unwrap();

        assert_eq!(response["id"], "t");
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "get_cocktail");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["name"]));
    }

    #[test]
    fn test_unknown_method() {
        let mut server = server();
        let response = handle(
            &mut server,
            json!({ "jsonrpc": "2.0", "id": 7, "method": "resources/list" }),
        )
        .unwrap();
        assert_eq!(response["error"]["code"], -32601);
        assert!(response["result"].is_null());
    }

    #[test]
    fn test_parse_error() {
        let mut server = server();
        let response = tokio_test::block_on(server.handle_message("{not json")).unwrap();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["error"]["code"], -32700);
        assert!(value["id"].is_null());
    }

    #[tokio::test]
    async fn test_call_tool_missing_params() {
        let mut server = server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#)
            .await
            .unwrap();
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["result"]["isError"], true);
        assert!(value["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Missing tool parameters"));
    }

    #[tokio::test]
    async fn test_run_over_buffers() {
        let mut server = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
            "\n",
        );
        let mut output = Vec::new();

        server.run(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["result"], json!({}));
        assert_eq!(lines[1]["result"]["isError"], true);
        assert_eq!(lines[1]["result"]["content"][0]["text"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_run_survives_malformed_lines() {
        let mut server = server();
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.push(b'\n');
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"{not json\n");
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');
        let mut output = Vec::new();

        server.run(input.as_slice(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], -32700);
        assert!(lines[1]["id"].is_null());
        assert_eq!(lines[2]["error"]["code"], -32700);
        assert!(lines[2]["id"].is_null());
        assert_eq!(lines[3]["id"], 2);
        assert_eq!(lines[3]["result"], json!({}));
    }

    #[test]
    fn test_failure_response_keeps_request_id() {
        let err: CocktailMcpError = McpError::ProtocolError {
            message: "boom".to_string(),
        }
        .into();
        let response = failure_response(Some(RequestId::Number(9)), &err);
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["id"], 9);
        assert_eq!(value["error"]["code"], -32603);
        assert_eq!(value["error"]["message"], "MCP protocol error: Protocol error: boom");
        assert!(value["result"].is_null());
    }
}
