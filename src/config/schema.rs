//! Schema validation
//!
//! This module checks the invariants option descriptors rely on before a schema is
//! turned into completions.

use crate::config::types::{Schema, SchemaOption};
use crate::error::{ConfigError, ConfigResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Program and command names end up as bare words in generated scripts
fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap())
}

fn flag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(-[A-Za-z0-9?]|--[A-Za-z0-9][A-Za-z0-9._-]*)$").unwrap())
}

/// Validate a complete schema
pub fn validate_schema(schema: &Schema) -> ConfigResult<()> {
    if !name_pattern().is_match(&schema.program) {
        return Err(ConfigError::InvalidProgramName(schema.program.clone()));
    }

    validate_options("global options", &schema.options)?;

    let mut names = HashSet::new();
    for command in &schema.commands {
        if !name_pattern().is_match(&command.name) {
            return Err(ConfigError::InvalidCommandName(command.name.clone()));
        }
        if !names.insert(command.name.as_str()) {
            return Err(ConfigError::DuplicateCommand(command.name.clone()));
        }
        validate_options(&format!("command '{}'", command.name), &command.options)?;
    }

    Ok(())
}

/// Validate the options of one scope (global options or a single command)
pub fn validate_options(scope: &str, options: &[SchemaOption]) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for option in options {
        validate_option(scope, option)?;

        for flag in &option.flags {
            if !seen.insert(flag.as_str()) {
                return Err(ConfigError::DuplicateFlag {
                    scope: scope.to_string(),
                    flag: flag.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validate a single option
pub fn validate_option(scope: &str, option: &SchemaOption) -> ConfigResult<()> {
    if option.flags.is_empty() {
        return Err(ConfigError::MissingFlags {
            scope: scope.to_string(),
        });
    }

    if let Some(flag) = option.flags.iter().find(|f| !flag_pattern().is_match(f)) {
        return Err(ConfigError::InvalidFlag {
            scope: scope.to_string(),
            flag: flag.clone(),
        });
    }

    if matches!(&option.choices, Some(choices) if choices.is_empty()) {
        return Err(ConfigError::EmptyChoices(option.display_name()));
    }

    if let Some(value_type) = &option.value_type {
        validate_value_type(&option.display_name(), value_type)?;
    }

    if let Some(nargs) = &option.nargs {
        validate_nargs(&option.display_name(), nargs)?;

        if nargs == "0" && option.value_type.is_some() {
            return Err(ConfigError::TypedFlagWithoutValue(option.display_name()));
        }
    }

    Ok(())
}

/// Validate a value type string
fn validate_value_type(flag: &str, value_type: &str) -> ConfigResult<()> {
    match value_type {
        "string" | "str" | "int" | "integer" | "float" | "bool" | "boolean" | "path" => Ok(()),
        _ => Err(ConfigError::InvalidType {
            flag: flag.to_string(),
            value_type: value_type.to_string(),
        }),
    }
}

/// Validate an nargs string
fn validate_nargs(flag: &str, nargs: &str) -> ConfigResult<()> {
    match nargs {
        "0" | "1" | "+" | "*" => Ok(()),
        _ => Err(ConfigError::InvalidNargs {
            flag: flag.to_string(),
            nargs: nargs.to_string(),
        }),
    }
}
