//! CLI module
//!
//! Command-line interface for browsing the catalog.
//!
//! # Commands
//!
//! - `browse` - Load pages of products and print them
//! - `show` - Load pages until a product is found and print its details

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
