//! CLI module - command-line interface
//!
//! Contains the subcommand tree and output rendering.

pub mod commands;
pub mod output;

pub use commands::{run, Command};
