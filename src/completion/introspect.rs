//! Descriptors from clap commands
//!
//! Lets a program built with clap feed its own argument definitions into the
//! generators instead of maintaining a schema file.

use crate::completion::descriptor::{
    Arity, CommandDescriptor, OptionDescriptor, ProgramDescriptor, ValueType,
};
use clap::{Arg, Command};

/// Build a program descriptor from a clap command and its visible subcommands
pub fn program_from_command(command: &Command) -> ProgramDescriptor {
    ProgramDescriptor {
        name: command.get_name().to_string(),
        description: command.get_about().map(|about| about.to_string()),
        regenerate_command: None,
        options: options_of(command),
        commands: command
            .get_subcommands()
            .filter(|sub| !sub.is_hide_set())
            .map(|sub| CommandDescriptor {
                name: sub.get_name().to_string(),
                description: sub.get_about().map(|about| about.to_string()),
                options: options_of(sub),
                argument_values: argument_values_of(sub),
            })
            .collect(),
    }
}

/// Descriptors for every non-positional argument of a command
pub fn options_of(command: &Command) -> Vec<OptionDescriptor> {
    command
        .get_arguments()
        .filter(|arg| !arg.is_positional())
        .map(option_from_arg)
        .collect()
}

/// Possible values of a command's visible positional arguments
pub fn argument_values_of(command: &Command) -> Vec<String> {
    command
        .get_arguments()
        .filter(|arg| arg.is_positional() && !arg.is_hide_set())
        .flat_map(|arg| arg.get_possible_values())
        .filter(|value| !value.is_hide_set())
        .map(|value| value.get_name().to_string())
        .collect()
}

/// Convert a single clap argument
pub fn option_from_arg(arg: &Arg) -> OptionDescriptor {
    let mut flags = Vec::new();
    if let Some(short) = arg.get_short() {
        flags.push(format!("-{}", short));
    }
    if let Some(long) = arg.get_long() {
        flags.push(format!("--{}", long));
    }

    let takes_values = arg.get_action().takes_values();

    let choices: Vec<String> = if takes_values {
        arg.get_possible_values()
            .iter()
            .filter(|value| !value.is_hide_set())
            .map(|value| value.get_name().to_string())
            .collect()
    } else {
        Vec::new()
    };

    OptionDescriptor {
        flags,
        destination: arg.get_id().to_string(),
        display_hint: arg
            .get_value_names()
            .and_then(|names| names.first())
            .map(|name| name.to_string()),
        value_type: if takes_values {
            ValueType::String
        } else {
            ValueType::None
        },
        default_value: arg
            .get_default_values()
            .first()
            .map(|value| value.to_string_lossy().into_owned()),
        required: arg.is_required_set(),
        arity: arity_of(arg, takes_values),
        choices: (!choices.is_empty()).then_some(choices),
        help: arg.get_help().map(|help| help.to_string()),
        deprecated: arg.is_hide_set(),
    }
}

fn arity_of(arg: &Arg, takes_values: bool) -> Arity {
    if !takes_values {
        return Arity::Zero;
    }

    match arg.get_num_args() {
        Some(range) if range.max_values() > 1 && range.min_values() == 0 => Arity::ZeroOrMore,
        Some(range) if range.max_values() > 1 => Arity::OneOrMore,
        _ => Arity::One,
    }
}
