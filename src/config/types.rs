//! Core schema types
//!
//! This module defines the data structures that represent an optcomp.yml schema file.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Top-level schema structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Schema {
    /// Name of the program the completions are for
    pub program: String,

    /// Program description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Command that prints the current completion script, used for stale-script checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regenerate: Option<String>,

    /// Options accepted before any subcommand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SchemaOption>,

    /// Subcommands, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<SchemaCommand>,

    /// Glob patterns of files that each hold one more command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// A subcommand definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaCommand {
    /// Subcommand name as typed on the command line
    pub name: String,

    /// Description shown next to the subcommand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the subcommand is hidden from completions
    #[serde(default)]
    pub hidden: bool,

    /// Options accepted by the subcommand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SchemaOption>,
}

/// An option (flag) definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaOption {
    /// Flag spellings, e.g. `["-c", "--config"]`
    #[serde(default)]
    pub flags: Vec<String>,

    /// Identifier of the value the option populates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    /// Value placeholder shown in help, e.g. `PATH`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,

    /// Value type conversion (string, int, float, bool, path)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Required option
    #[serde(default)]
    pub required: bool,

    /// Number of values consumed: 0, 1, + or *
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_nargs"
    )]
    pub nargs: Option<String>,

    /// Allowed literal values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,

    /// Usage description for help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Deprecated option (left out of completions)
    #[serde(default)]
    pub deprecated: bool,
}

impl SchemaOption {
    /// Name used for this option in error messages
    pub fn display_name(&self) -> String {
        self.flags
            .iter()
            .find(|f| f.starts_with("--"))
            .or_else(|| self.flags.first())
            .cloned()
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// Render a YAML scalar as the literal a user would type
///
/// Returns `None` for `null`, which marks an absent value.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => serde_yaml::to_string(other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

/// Accept `nargs: 1` as well as `nargs: "+"`
fn deserialize_nargs<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(D::Error::custom("nargs must be a number or one of '+', '*'")),
    }
}
