//! Fish completion scripts
//!
//! The script defines a `__<program>_current_arg` helper, then registers subcommands,
//! global flags and per-subcommand flags. Flags whose values need exact completion get
//! an extra directive from `emit`, and every other entry is suppressed while such a
//! flag is waiting for its value.

use crate::completion::classify::has_exact_completion_kind;
use crate::completion::descriptor::{CommandDescriptor, OptionDescriptor, ProgramDescriptor};
use crate::completion::emit::{
    current_arg_function, escape_single_quoted, exact_completion, single_quoted,
};
use crate::completion::text::dedent_lines;
use rayon::prelude::*;
use tracing::debug;

/// Generate the complete fish completion script for a program
pub fn fish_completion(program: &ProgramDescriptor) -> String {
    let name = program.name.as_str();
    let mut lines: Vec<String> = Vec::new();

    if let Some(regenerate) = &program.regenerate_command {
        lines.extend(version_check(name, regenerate));
        lines.push(String::new());
    }

    let all_commands = program
        .commands
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let exact_option_args = program
        .all_options()
        .filter(|o| has_exact_completion_kind(o))
        .map(OptionDescriptor::joined_flags)
        .collect::<Vec<_>>()
        .join(" ");

    let preamble = format!(
        r#"
        function {current_arg} --description 'Check if any of the given arguments are the last on the command line before the cursor'
            set -l all_args (commandline -poc)
            # nothing to check until something follows the program name
            if [ (count $all_args) -lt 2 ]
                return 1
            end
            for arg in $argv
                if [ "$arg" = "$all_args[-1]" ]
                    return 0
                end
            end
            return 1
        end

        set --local action_parser_condition "not __fish_seen_subcommand_from {all_commands}"
        set --local exact_option_condition "not {current_arg} {exact_option_args}"
        "#,
        current_arg = current_arg_function(name),
    );
    lines.extend(dedent_lines(&preamble).into_iter().map(String::from));

    lines.push("\n# subcommand completions".to_string());
    lines.extend(program.commands.iter().map(|command| command_entry(name, command)));

    lines.push("\n# global flags".to_string());
    lines.par_extend(
        program
            .options
            .par_iter()
            .filter(|option| is_listed(option))
            .map(|option| global_flag_entry(name, option)),
    );

    lines.push("\n# subcommand flags".to_string());
    lines.par_extend(program.commands.par_iter().flat_map_iter(|command| {
        command
            .options
            .iter()
            .filter(|option| is_listed(option))
            .map(move |option| command_flag_entry(name, command, option))
    }));

    if program.commands.iter().any(|c| !c.argument_values.is_empty()) {
        lines.push("\n# subcommand arguments".to_string());
        lines.extend(
            program
                .commands
                .iter()
                .filter(|command| !command.argument_values.is_empty())
                .map(|command| command_argument_entry(name, command)),
        );
    }

    debug!(
        program = name,
        commands = program.commands.len(),
        "generated fish completion script"
    );

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

fn is_listed(option: &OptionDescriptor) -> bool {
    !option.deprecated && !option.flags.is_empty()
}

fn command_entry(program: &str, command: &CommandDescriptor) -> String {
    format!(
        "complete -c {} -f -n \"$action_parser_condition\" -n \"$exact_option_condition\" -a {} -d {}",
        program,
        single_quoted(&command.name),
        single_quoted(command.description.as_deref().unwrap_or_default())
    )
}

fn global_flag_entry(program: &str, option: &OptionDescriptor) -> String {
    format!(
        "complete -c {} -f -n \"$exact_option_condition\" -a '{}' -d {}{}",
        program,
        option.joined_flags(),
        single_quoted(option.help.as_deref().unwrap_or_default()),
        exact_completion(program, option)
    )
}

fn command_flag_entry(
    program: &str,
    command: &CommandDescriptor,
    option: &OptionDescriptor,
) -> String {
    format!(
        "complete -c {} -f -n \"$exact_option_condition\" -a '{}' -d {} -n \"__fish_seen_subcommand_from {}\"{}",
        program,
        option.joined_flags(),
        single_quoted(option.help.as_deref().unwrap_or_default()),
        command.name,
        exact_completion(program, option)
    )
}

fn command_argument_entry(program: &str, command: &CommandDescriptor) -> String {
    let values = command
        .argument_values
        .iter()
        .map(|value| escape_single_quoted(value))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "complete -c {} -f -n \"$exact_option_condition\" -n \"__fish_seen_subcommand_from {}\" -a '{}'",
        program, command.name, values
    )
}

/// Function that warns in the background when the installed script differs from what
/// `regenerate` prints now
fn version_check(program: &str, regenerate: &str) -> Vec<String> {
    let install_path = format!("~/.config/fish/completions/{}.fish", program);

    let mut inner = vec![
        "if test -f \"$this_filename\"".to_string(),
        "    set this_script (cat $this_filename 2> /dev/null)".to_string(),
        format!("    set installed_script ({} 2> /dev/null)", regenerate),
        "    if [ \"$this_script\" != \"$installed_script\" ] && [ \"$installed_script\" != \"\" ]"
            .to_string(),
    ];
    for line in upgrade_message(program, regenerate, &install_path) {
        inner.push(format!("        echo \"{}\"", line.replace('"', "\\\"")));
    }
    inner.push("    end".to_string());
    inner.push("end".to_string());

    let mut lines = vec![
        format!("function __{}_check_version", program),
        "    set -fx this_filename (status current-filename)".to_string(),
        "    fish -c '".to_string(),
    ];
    lines.extend(
        inner
            .iter()
            .map(|line| format!("        {}", escape_single_quoted(line))),
    );
    lines.push("    ' &".to_string());
    lines.push("end".to_string());
    lines.push(format!("__{}_check_version", program));
    lines
}

fn upgrade_message(program: &str, regenerate: &str, install_path: &str) -> Vec<String> {
    vec![
        format!(
            "Your fish completions script is from a different version of {} than is",
            program
        ),
        "currently installed. Please upgrade your script so your completions match the"
            .to_string(),
        format!("command-line flags in your installed {}! Try this to upgrade:", program),
        String::new(),
        format!("    {} > {}", regenerate, install_path),
        format!("    source {}", install_path),
    ]
}
