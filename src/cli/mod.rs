//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, schema loading and writing the generated
//! scripts, as well as completions for optcomp itself.

pub mod app;
pub mod logging;

// Re-export main types
pub use app::*;
pub use logging::Verbosity;
