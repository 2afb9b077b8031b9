//! Error types for the Cocktail MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Cocktail MCP Server
#[derive(Error, Debug)]
pub enum CocktailMcpError {
    /// CocktailDB API errors
    #[error(transparent)]
    CocktailDb(#[from] CocktailDbError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// CocktailDB API errors
#[derive(Error, Debug)]
pub enum CocktailDbError {
    #[error("CocktailDB API error: {status}")]
    RequestFailed { status: reqwest::StatusCode },

    #[error("CocktailDB request failed: {message}")]
    Transport { message: String },

    #[error("CocktailDB request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("Invalid CocktailDB response: {message}")]
    Decode { message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidEnvVar { var: String, value: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },
}

/// Result type alias for Cocktail MCP operations
pub type Result<T> = std::result::Result<T, CocktailMcpError>;

impl From<reqwest::Error> for CocktailDbError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CocktailDbError::RequestFailed { status },
            None => CocktailDbError::Transport {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CocktailDbError::RequestFailed {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.to_string(), "CocktailDB API error: 503 Service Unavailable");
    }

    #[test]
    fn test_upstream_errors_are_transparent() {
        let err: CocktailMcpError = CocktailDbError::Decode {
            message: "expected value".to_string(),
        }
        .into();
        assert!(matches!(err, CocktailMcpError::CocktailDb(_)));
        assert_eq!(err.to_string(), "Invalid CocktailDB response: expected value");
    }

    #[test]
    fn test_validation_message() {
        let err: CocktailMcpError = ValidationError::InvalidArguments {
            message: "missing field `name`".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid arguments: missing field `name`");
    }

    #[test]
    fn test_unknown_tool_display() {
        let err = McpError::UnknownTool {
            name: "get_beer".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown tool: get_beer");
    }
}
