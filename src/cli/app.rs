//! Main CLI application

use crate::cli::logging::{self, Verbosity};
use crate::completion::{
    bash_completion, classify, fish_completion, has_opaque_required_value, is_choice_option,
    is_file_path_option, program_from_command, CompletionCategory, OptionDescriptor,
    ProgramDescriptor,
};
use crate::config::{parse_schema_auto, parse_schema_file, validate_schema};
use crate::error::OptcompError;
use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use directories::BaseDirs;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name optcomp registers its own completions under
const BIN_NAME: &str = "optcomp";

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    /// Create a new app
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with command line arguments
    pub fn run(self) -> anyhow::Result<()> {
        let matches = self.command.clone().get_matches();
        self.run_matches(&matches)
    }

    /// Run the application with already parsed arguments
    pub fn run_matches(mut self, matches: &ArgMatches) -> anyhow::Result<()> {
        // Global flags are propagated down, so the deepest matches see them all
        let scope = matches.subcommand().map(|(_, m)| m).unwrap_or(matches);
        logging::init(get_verbosity(scope));

        let file = scope.get_one::<PathBuf>("file");

        match matches.subcommand() {
            Some(("fish", sub)) => {
                let program = load_program(file)?;
                let script = fish_completion(&program);

                if sub.get_flag("install") {
                    let path = fish_completions_dir()?.join(format!("{}.fish", program.name));
                    write_script(&path, &script)?;
                    info!("Installed fish completions to {}", path.display());
                } else {
                    emit_script(sub.get_one::<PathBuf>("output"), &script)?;
                }
            }
            Some(("bash", sub)) => {
                let program = load_program(file)?;
                emit_script(sub.get_one::<PathBuf>("output"), &bash_completion(&program))?;
            }
            Some(("classify", _)) => {
                let program = load_program(file)?;
                print!("{}", classification_table(&program));
            }
            Some(("completions", sub)) => {
                let shell = sub
                    .get_one::<Shell>("shell")
                    .copied()
                    .context("no shell given")?;
                self_completions(shell, &mut self.command, &mut io::stdout())?;
            }
            _ => {
                self.command.print_help()?;
                println!();
            }
        }

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Write the script to this file instead of stdout");

    Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate shell completions from declared command-line options")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Path to optcomp.yml schema file")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no log output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("fish")
                .about("Print the fish completion script for the schema's program")
                .arg(output.clone())
                .arg(
                    Arg::new("install")
                        .long("install")
                        .help("Install the script into the fish completions directory")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output"),
                ),
        )
        .subcommand(
            Command::new("bash")
                .about("Print the bash completion script for the schema's program")
                .arg(output),
        )
        .subcommand(Command::new("classify").about("Show how each declared option is completed"))
        .subcommand(
            Command::new("completions")
                .about("Print completions for optcomp itself")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .required(true)
                        .value_parser(value_parser!(Shell))
                        .help("Shell to generate completions for"),
                ),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Load and validate the schema, either from `file` or by discovery
pub fn load_program(file: Option<&PathBuf>) -> Result<ProgramDescriptor, OptcompError> {
    let (schema, path) = match file {
        Some(path) => (parse_schema_file(path)?, path.clone()),
        None => parse_schema_auto()?,
    };
    validate_schema(&schema)?;

    debug!(
        path = %path.display(),
        program = %schema.program,
        commands = schema.commands.len(),
        "loaded schema"
    );

    Ok(ProgramDescriptor::from_config(schema))
}

/// Completions for optcomp itself
///
/// Fish uses optcomp's own generator over its command definition; every other shell
/// is handled by clap_complete.
pub fn self_completions(
    shell: Shell,
    command: &mut Command,
    out: &mut dyn Write,
) -> io::Result<()> {
    match shell {
        Shell::Fish => {
            let program = program_from_command(command)
                .with_regenerate_command(format!("{} completions fish", BIN_NAME));
            out.write_all(fish_completion(&program).as_bytes())
        }
        _ => {
            clap_complete::generate(shell, command, BIN_NAME, out);
            Ok(())
        }
    }
}

/// Human-readable table of how every option is classified
pub fn classification_table(program: &ProgramDescriptor) -> String {
    let mut rows = Vec::new();
    for option in &program.options {
        rows.push(classification_row("(global)", option));
    }
    for command in &program.commands {
        for option in &command.options {
            rows.push(classification_row(&command.name, option));
        }
    }

    let mut table = format!(
        "{}\n",
        format!(
            "{:<14} {:<32} {:<6} {:<7} {:<7} {}",
            "SCOPE", "FLAGS", "FILE", "CHOICE", "OPAQUE", "EMITS"
        )
        .bold()
    );
    for row in rows {
        table.push_str(&row);
        table.push('\n');
    }
    table
}

fn classification_row(scope: &str, option: &OptionDescriptor) -> String {
    let mark = |set: bool, width: usize| {
        let text = format!("{:<width$}", if set { "yes" } else { "-" }, width = width);
        if set {
            text.green().to_string()
        } else {
            text.dimmed().to_string()
        }
    };

    let category = classify(option);
    let emits = match category {
        CompletionCategory::None => category.as_str().dimmed().to_string(),
        _ => category.as_str().cyan().bold().to_string(),
    };

    let mut flags = option.joined_flags();
    if option.deprecated {
        flags.push_str(" (deprecated)");
    }

    format!(
        "{:<14} {:<32} {} {} {} {}",
        scope,
        flags,
        mark(is_file_path_option(option), 6),
        mark(is_choice_option(option), 7),
        mark(has_opaque_required_value(option), 7),
        emits
    )
}

/// Write to `output` when given, otherwise to stdout
fn emit_script(output: Option<&PathBuf>, script: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_script(path, script)?;
            info!("Wrote completion script to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(script.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn write_script(path: &Path, script: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, script).with_context(|| format!("Failed to write {}", path.display()))
}

/// Directory fish loads completions from: `$XDG_CONFIG_HOME/fish/completions`,
/// falling back to `~/.config/fish/completions`
pub fn fish_completions_dir() -> anyhow::Result<PathBuf> {
    if let Some(config_home) = env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(config_home).join("fish").join("completions"));
    }

    let dirs = BaseDirs::new().context("Could not determine the home directory")?;
    Ok(dirs.home_dir().join(".config").join("fish").join("completions"))
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    App::new().run()
}
