//! CLI library modules for the lexner binary.
//!
//! Kept in the library so the commands can be tested without spawning a
//! process.

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{Cli, Commands, OutputFormat};
