//! Option and program descriptors
//!
//! These are the read-only inputs to classification and script generation. They
//! differ from the schema types in `config` by having every default resolved and
//! every free-form string turned into a closed enum.

use crate::config::{self, scalar_to_string};

/// Semantic conversion applied to an option's raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    /// Raw text, no conversion declared
    #[default]
    None,
    Integer,
    String,
    /// Any other conversion (float, bool, path, ...)
    Other,
}

impl ValueType {
    /// Parse a schema `type` string; unknown names degrade to `Other`
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" | "integer" => ValueType::Integer,
            "str" | "string" => ValueType::String,
            _ => ValueType::Other,
        }
    }
}

/// How many values an option consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    Zero,
    #[default]
    One,
    OneOrMore,
    ZeroOrMore,
}

impl Arity {
    /// Parse a schema `nargs` string; unknown values degrade to `One`
    pub fn from_nargs(nargs: &str) -> Self {
        match nargs {
            "0" => Arity::Zero,
            "+" => Arity::OneOrMore,
            "*" => Arity::ZeroOrMore,
            _ => Arity::One,
        }
    }

    /// Whether the option accepts a variable number of values
    pub fn is_variadic(self) -> bool {
        matches!(self, Arity::OneOrMore | Arity::ZeroOrMore)
    }
}

/// Static metadata describing one command-line option
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionDescriptor {
    /// Flag spellings, short and long
    pub flags: Vec<String>,

    /// Identifier of the value this option populates
    pub destination: String,

    /// Free-text tag for the value's shape (metavar)
    pub display_hint: Option<String>,

    pub value_type: ValueType,

    /// Value used when the option is absent
    pub default_value: Option<String>,

    pub required: bool,

    pub arity: Arity,

    /// Allowed literal values, in declaration order
    pub choices: Option<Vec<String>>,

    /// One-line description
    pub help: Option<String>,

    /// Deprecated options are left out of generated scripts
    pub deprecated: bool,
}

impl OptionDescriptor {
    /// Create a descriptor with the given flags and a destination derived from them
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let flags: Vec<String> = flags.into_iter().map(Into::into).collect();
        let destination = destination_from_flags(&flags);

        OptionDescriptor {
            flags,
            destination,
            ..Default::default()
        }
    }

    /// Create a descriptor from a schema option
    pub fn from_config(option: config::SchemaOption) -> Self {
        let destination = option
            .dest
            .clone()
            .unwrap_or_else(|| destination_from_flags(&option.flags));

        OptionDescriptor {
            destination,
            display_hint: option.metavar,
            value_type: option
                .value_type
                .as_deref()
                .map(ValueType::from_name)
                .unwrap_or_default(),
            default_value: option.default.as_ref().and_then(scalar_to_string),
            required: option.required,
            arity: option
                .nargs
                .as_deref()
                .map(Arity::from_nargs)
                .unwrap_or_default(),
            choices: option
                .choices
                .map(|choices| choices.iter().filter_map(scalar_to_string).collect::<Vec<_>>())
                .filter(|choices| !choices.is_empty()),
            help: option.help,
            deprecated: option.deprecated,
            flags: option.flags,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.display_hint = Some(hint.into());
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Flags joined by spaces, as they appear in generated directives
    pub fn joined_flags(&self) -> String {
        self.flags.join(" ")
    }
}

/// Derive a destination the way option parsers do: first long flag, else first flag,
/// without leading dashes and with inner dashes turned into underscores
pub fn destination_from_flags(flags: &[String]) -> String {
    flags
        .iter()
        .find(|f| f.starts_with("--"))
        .or_else(|| flags.first())
        .map(|f| f.trim_start_matches('-').replace('-', "_"))
        .unwrap_or_default()
}

/// A subcommand and the options it accepts
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub options: Vec<OptionDescriptor>,

    /// Literal values accepted by the command's positional arguments
    pub argument_values: Vec<String>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        CommandDescriptor {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_argument_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argument_values.extend(values.into_iter().map(Into::into));
        self
    }
}

/// Everything needed to generate a program's completion script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramDescriptor {
    /// Program name passed to `complete -c`
    pub name: String,

    pub description: Option<String>,

    /// Shell command printing the current script, enables stale-script warnings
    pub regenerate_command: Option<String>,

    /// Options accepted before any subcommand
    pub options: Vec<OptionDescriptor>,

    /// Subcommands in declaration order
    pub commands: Vec<CommandDescriptor>,
}

impl ProgramDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        ProgramDescriptor {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a program descriptor from a schema, dropping hidden commands
    pub fn from_config(schema: config::Schema) -> Self {
        ProgramDescriptor {
            name: schema.program,
            description: schema.description,
            regenerate_command: schema.regenerate,
            options: schema
                .options
                .into_iter()
                .map(OptionDescriptor::from_config)
                .collect(),
            commands: schema
                .commands
                .into_iter()
                .filter(|command| !command.hidden)
                .map(|command| CommandDescriptor {
                    name: command.name,
                    description: command.description,
                    options: command
                        .options
                        .into_iter()
                        .map(OptionDescriptor::from_config)
                        .collect(),
                    argument_values: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn with_regenerate_command(mut self, command: impl Into<String>) -> Self {
        self.regenerate_command = Some(command.into());
        self
    }

    pub fn with_option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_command(mut self, command: CommandDescriptor) -> Self {
        self.commands.push(command);
        self
    }

    /// Global options followed by every command's options, in declaration order
    pub fn all_options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options
            .iter()
            .chain(self.commands.iter().flat_map(|c| c.options.iter()))
    }
}
