pub mod config;
pub mod db;
pub mod error;

// Read-only recipe access
pub mod corpus;

// Ingredient match ranking
pub mod search;

// HTTP surface
pub mod api;

pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
