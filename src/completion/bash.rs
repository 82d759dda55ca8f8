//! Bash completion scripts
//!
//! Bash gets word lists only: once a subcommand appears on the command line its flags
//! are offered alongside the subcommand names and global flags.

use crate::completion::descriptor::{OptionDescriptor, ProgramDescriptor};
use tracing::debug;

/// Generate the complete bash completion script for a program
pub fn bash_completion(program: &ProgramDescriptor) -> String {
    let name = program.name.as_str();
    let function_name = format!("complete_{}", identifier(name));
    let check_version = format!("_{}_check_version", identifier(name));

    let global_flags = flags_of(&program.options);
    let commands = program
        .commands
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines: Vec<String> = Vec::new();

    if let Some(regenerate) = &program.regenerate_command {
        lines.push(format!("{}() {{", check_version));
        lines.push("    local this_script=\"$(cat \"$BASH_SOURCE\" 2> /dev/null)\"".to_string());
        lines.push(format!(
            "    local installed_script=\"$({} 2> /dev/null)\"",
            regenerate
        ));
        lines.push(
            "    if [ \"$this_script\" != \"$installed_script\" ] && [ \"$installed_script\" != \"\" ];"
                .to_string(),
        );
        lines.push("        then cat << EOF".to_string());
        lines.extend(upgrade_message(name, regenerate));
        lines.push("EOF".to_string());
        lines.push("    fi".to_string());
        lines.push("}".to_string());
    }

    lines.push(format!("{}() {{", function_name));

    // Later subcommands first so the most specific match wins
    for command in program.commands.iter().rev() {
        lines.push(format!(
            "    if grep -qw \"{}\" <<< \"${{COMP_WORDS[*]}}\"; then",
            command.name
        ));
        lines.push(format!(
            "        COMPREPLY=($(compgen -W \"{}\" -- \"${{COMP_WORDS[COMP_CWORD]}}\"))",
            word_list(&[
                flags_of(&command.options).as_str(),
                command.argument_values.join(" ").as_str(),
                commands.as_str(),
                global_flags.as_str(),
            ])
        ));
        lines.push("        return 0".to_string());
        lines.push("    fi".to_string());
    }

    lines.push(format!(
        "    COMPREPLY=($(compgen -W \"{}\" -- \"${{COMP_WORDS[COMP_CWORD]}}\"))",
        word_list(&[commands.as_str(), global_flags.as_str()])
    ));
    if program.regenerate_command.is_some() {
        lines.push(format!("    ({} &)", check_version));
    }
    lines.push("}".to_string());
    lines.push(format!(
        "\ncomplete -o bashdefault -o default -F {} {}",
        function_name, name
    ));

    debug!(
        program = name,
        commands = program.commands.len(),
        "generated bash completion script"
    );

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Every flag spelling of the listed options, space separated
fn flags_of(options: &[OptionDescriptor]) -> String {
    options
        .iter()
        .filter(|option| !option.deprecated)
        .flat_map(|option| option.flags.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn word_list(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Program name usable inside a bash function name
fn identifier(program: &str) -> String {
    program
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn upgrade_message(program: &str, regenerate: &str) -> Vec<String> {
    vec![
        format!(
            "Your bash completions script is from a different version of {} than is",
            program
        ),
        "currently installed. Please upgrade your script so your completions match the"
            .to_string(),
        format!("command-line flags in your installed {}! Try this to upgrade:", program),
        String::new(),
        format!("    sudo sh -c \"{} > $BASH_SOURCE\"", regenerate),
        "    source $BASH_SOURCE".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::descriptor::CommandDescriptor;

    fn program() -> ProgramDescriptor {
        ProgramDescriptor::new("backup-ctl")
            .with_option(OptionDescriptor::new(["-c", "--config"]))
            .with_option(OptionDescriptor::new(["--old"]).with_deprecated(true))
            .with_command(
                CommandDescriptor::new("create").with_option(OptionDescriptor::new(["--stats"])),
            )
            .with_command(
                CommandDescriptor::new("list").with_option(OptionDescriptor::new(["--json"])),
            )
    }

    #[test]
    fn test_commands_checked_in_reverse_order() {
        let script = bash_completion(&program());

        let list = script.find("grep -qw \"list\"").unwrap();
        let create = script.find("grep -qw \"create\"").unwrap();
        assert!(list < create);
    }

    #[test]
    fn test_word_lists() {
        let script = bash_completion(&program());

        assert!(script.contains(
            "COMPREPLY=($(compgen -W \"--stats create list -c --config\" -- \"${COMP_WORDS[COMP_CWORD]}\"))"
        ));
        assert!(script.contains(
            "    COMPREPLY=($(compgen -W \"create list -c --config\" -- \"${COMP_WORDS[COMP_CWORD]}\"))\n}"
        ));
        assert!(!script.contains("--old"));
    }

    #[test]
    fn test_registration_uses_safe_function_name() {
        let script = bash_completion(&program());

        assert!(script.contains("complete_backup_ctl() {"));
        assert!(script.ends_with(
            "\n\ncomplete -o bashdefault -o default -F complete_backup_ctl backup-ctl\n"
        ));
    }

    #[test]
    fn test_version_check_only_with_regenerate_command() {
        let script = bash_completion(&program());
        assert!(!script.contains("check_version"));

        let program = program().with_regenerate_command("backup-ctl --bash-completion");
        let script = bash_completion(&program);
        assert!(script.starts_with("_backup_ctl_check_version() {\n"));
        assert!(script.contains(
            "local installed_script=\"$(backup-ctl --bash-completion 2> /dev/null)\""
        ));
        assert!(script.contains("    (_backup_ctl_check_version &)\n}"));
        assert!(script.contains("\nEOF\n    fi\n}\n"));
    }

    #[test]
    fn test_argument_values_follow_command_flags() {
        let program = ProgramDescriptor::new("tool").with_command(
            CommandDescriptor::new("completions")
                .with_option(OptionDescriptor::new(["--dir"]))
                .with_argument_values(["bash", "fish"]),
        );
        let script = bash_completion(&program);
        assert!(script.contains("compgen -W \"--dir bash fish completions\" --"));
    }

    #[test]
    fn test_command_without_flags() {
        let program = ProgramDescriptor::new("tool").with_command(CommandDescriptor::new("run"));
        let script = bash_completion(&program);
        assert!(script.contains("compgen -W \"run\" --"));
    }
}
