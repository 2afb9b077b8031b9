//! Cocktail MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing a cocktail recipe search tool
//! backed by the public CocktailDB API.

pub mod cocktaildb;
pub mod config;
pub mod error;
pub mod mcp;

pub use config::Config;
pub use error::{CocktailMcpError, Result};
