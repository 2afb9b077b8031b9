//! CocktailDB API module
//!
//! Contains types, rendering, and client for interacting with the CocktailDB API.

pub mod client;
pub mod format;
pub mod types;
