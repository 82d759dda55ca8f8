//! Option classification
//!
//! Each predicate answers one question about an option independently of the others,
//! so an option may belong to several categories at once. `classify` picks the one
//! that wins when a single directive has to be emitted.

use crate::completion::descriptor::{OptionDescriptor, ValueType};

/// Display hints naming a filesystem path
pub const PATH_HINTS: &[&str] = &["FILENAME", "PATH"];

/// Destination reserved for configuration file paths
pub const CONFIG_PATHS_DESTINATION: &str = "config_paths";

/// Display hints whose values a shell cannot enumerate
pub const OPAQUE_HINTS: &[&str] = &["PATTERN", "KEYS", "N"];

/// Kind of value completion an option needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCategory {
    FilePath,
    Choice,
    OpaqueRequired,
    None,
}

impl CompletionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionCategory::FilePath => "file",
            CompletionCategory::Choice => "choice",
            CompletionCategory::OpaqueRequired => "opaque",
            CompletionCategory::None => "none",
        }
    }
}

impl std::fmt::Display for CompletionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn hint_in(option: &OptionDescriptor, hints: &[&str]) -> bool {
    option
        .display_hint
        .as_deref()
        .is_some_and(|hint| hints.contains(&hint))
}

/// Whether the option takes a filesystem path
pub fn is_file_path_option(option: &OptionDescriptor) -> bool {
    hint_in(option, PATH_HINTS) || option.destination == CONFIG_PATHS_DESTINATION
}

/// Whether the option only accepts a declared set of literals
pub fn is_choice_option(option: &OptionDescriptor) -> bool {
    option
        .choices
        .as_ref()
        .is_some_and(|choices| !choices.is_empty())
}

/// Whether the option needs a value the shell cannot usefully enumerate
///
/// Completion for such options must not fall back to suggesting flags, subcommands or
/// files after the option is typed.
pub fn has_opaque_required_value(option: &OptionDescriptor) -> bool {
    option.required
        || option.arity.is_variadic()
        || hint_in(option, OPAQUE_HINTS)
        || (matches!(option.value_type, ValueType::Integer | ValueType::String)
            && option.default_value.is_none())
}

/// Whether the option needs a dedicated completion directive at all
pub fn has_exact_completion_kind(option: &OptionDescriptor) -> bool {
    is_file_path_option(option) || is_choice_option(option) || has_opaque_required_value(option)
}

/// The single category used for emission: file path, then choice, then opaque
pub fn classify(option: &OptionDescriptor) -> CompletionCategory {
    if is_file_path_option(option) {
        CompletionCategory::FilePath
    } else if is_choice_option(option) {
        CompletionCategory::Choice
    } else if has_opaque_required_value(option) {
        CompletionCategory::OpaqueRequired
    } else {
        CompletionCategory::None
    }
}
