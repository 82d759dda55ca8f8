//! Error types for optcomp
//!
//! Classification and emission are total and never fail; everything here belongs to
//! loading schema files and writing scripts.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for optcomp operations
pub type Result<T> = std::result::Result<T, OptcompError>;

/// Main error type for optcomp
#[derive(Error, Debug)]
pub enum OptcompError {
    /// Schema-related errors
    #[error("Schema error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Schema parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find schema file (searched: {0})")]
    NotFound(String),

    #[error("Invalid schema: {0}")]
    Invalid(String),

    #[error("Invalid program name '{0}'")]
    InvalidProgramName(String),

    #[error("Invalid command name '{0}'")]
    InvalidCommandName(String),

    #[error("Option in {scope} declares no flags")]
    MissingFlags { scope: String },

    #[error("Invalid flag '{flag}' in {scope}")]
    InvalidFlag { scope: String, flag: String },

    #[error("Option '{0}' declares an empty choice list")]
    EmptyChoices(String),

    #[error("Option '{flag}' has invalid type '{value_type}'. Must be one of: string, int, float, bool, path")]
    InvalidType { flag: String, value_type: String },

    #[error("Option '{flag}' has invalid nargs '{nargs}'. Must be one of: 0, 1, +, *")]
    InvalidNargs { flag: String, nargs: String },

    #[error("Option '{0}' takes no value but declares a type")]
    TypedFlagWithoutValue(String),

    #[error("Flag '{flag}' is declared more than once in {scope}")]
    DuplicateFlag { scope: String, flag: String },

    #[error("Command '{0}' is declared more than once")]
    DuplicateCommand(String),

    #[error("Failed to include file '{path}': {error}")]
    IncludeFile { path: PathBuf, error: String },

    #[error("Invalid include pattern '{pattern}': {error}")]
    IncludePattern { pattern: String, error: String },
}

/// Specialized result type for schema operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
