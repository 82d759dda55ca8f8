//! Schema file parsing and discovery

use crate::config::types::{Schema, SchemaCommand};
use crate::error::{ConfigError, ConfigResult, OptcompError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default schema file names to search for
const SCHEMA_FILE_NAMES: &[&str] = &["optcomp.yml", "optcomp.yaml"];

/// Find the schema file by searching current and parent directories
pub fn find_schema_file() -> ConfigResult<PathBuf> {
    find_schema_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the schema file starting from a specific directory
pub fn find_schema_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in SCHEMA_FILE_NAMES {
            let schema_path = current_dir.join(file_name);
            searched_paths.push(schema_path.display().to_string());

            if schema_path.is_file() {
                debug!(path = %schema_path.display(), "found schema file");
                return Ok(schema_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Parse a schema file from a path
pub fn parse_schema_file(path: &Path) -> Result<Schema, OptcompError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read file: {}", e)))?;

    parse_schema(&contents, Some(path))
}

/// Parse a schema from a string
///
/// Includes are only resolved when the schema's own path is known.
pub fn parse_schema(yaml: &str, schema_path: Option<&Path>) -> Result<Schema, OptcompError> {
    let mut schema: Schema = serde_yaml::from_str(yaml)?;

    if let Some(base_path) = schema_path {
        process_includes(&mut schema, base_path)?;
    }

    Ok(schema)
}

/// Append the commands named by `include` patterns, in sorted path order
fn process_includes(schema: &mut Schema, schema_path: &Path) -> ConfigResult<()> {
    let base_dir = schema_path.parent().unwrap_or_else(|| Path::new("."));

    for pattern in &schema.include {
        let full_pattern = base_dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let paths = glob::glob(&full_pattern).map_err(|e| ConfigError::IncludePattern {
            pattern: pattern.clone(),
            error: e.to_string(),
        })?;

        let mut matched = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| ConfigError::IncludeFile {
                path: e.path().to_path_buf(),
                error: e.to_string(),
            })?;
            matched.push(path);
        }
        matched.sort();

        if matched.is_empty() {
            debug!(pattern = %pattern, "include pattern matched no files");
        }

        for path in matched {
            debug!(path = %path.display(), "including command file");
            schema.commands.push(load_included_command(&path)?);
        }
    }

    Ok(())
}

/// Load a command from an included file
fn load_included_command(path: &Path) -> ConfigResult<SchemaCommand> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::IncludeFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    serde_yaml::from_str(&contents).map_err(|e| ConfigError::IncludeFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Parse a schema with automatic file discovery
pub fn parse_schema_auto() -> Result<(Schema, PathBuf), OptcompError> {
    let schema_path = find_schema_file()?;
    let schema = parse_schema_file(&schema_path)?;
    Ok((schema, schema_path))
}
