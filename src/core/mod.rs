//! Core module - shared infrastructure for the BrowserAct client
//!
//! This module contains foundational types, configuration, and error handling
//! used throughout the crate.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{BrowserActError, Result};
pub use types::ApiKey;
