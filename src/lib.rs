//! optcomp - shell completions from declared command-line options
//!
//! optcomp classifies each declared option by the kind of value completion it needs
//! (file path, enumerated choice, or an opaque value the shell must not guess) and
//! turns a whole program's options into fish or bash completion scripts.

// Public modules
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{OptcompError, Result};

/// Current version of optcomp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
