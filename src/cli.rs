//! CLI argument parsing and command dispatch

pub mod args;
pub mod catalog;
pub mod common;
pub mod identify;
pub mod render;
pub mod validate;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
