//! Integration tests for classification and script generation

mod common;

use common::BACKUP_SCHEMA;
use optcomp::completion::{
    bash_completion, classify, exact_completion, fish_completion, has_exact_completion_kind,
    has_opaque_required_value, is_choice_option, is_file_path_option, Arity, CompletionCategory,
    OptionDescriptor, ProgramDescriptor, ValueType,
};
use optcomp::config::parse_schema;

fn backup_program() -> ProgramDescriptor {
    ProgramDescriptor::from_config(parse_schema(BACKUP_SCHEMA, None).unwrap())
}

#[test]
fn test_required_path_option_completes_files() {
    let option = OptionDescriptor::new(["--flag"])
        .with_hint("PATH")
        .with_value_type(ValueType::String)
        .with_required(true);

    assert!(is_file_path_option(&option));
    assert!(has_opaque_required_value(&option));
    assert_eq!(
        exact_completion("backupctl", &option),
        "\ncomplete -c backupctl -Fr -n \"__backupctl_current_arg --flag\""
    );
}

#[test]
fn test_choice_option_lists_choices_in_order() {
    let option = OptionDescriptor::new(["--flag"]).with_choices(["a", "b"]);

    assert!(is_choice_option(&option));
    assert!(!is_file_path_option(&option));
    assert!(!has_opaque_required_value(&option));
    assert_eq!(
        exact_completion("backupctl", &option),
        "\ncomplete -c backupctl -f -a 'a b' -n \"__backupctl_current_arg --flag\""
    );
}

#[test]
fn test_plain_options_need_no_directive() {
    for arity in [Arity::Zero, Arity::One] {
        let option = OptionDescriptor::new(["--flag"]).with_arity(arity);
        assert!(!has_exact_completion_kind(&option));
        assert_eq!(exact_completion("backupctl", &option), "");
    }
}

#[test]
fn test_schema_categories() {
    let program = backup_program();
    let categories: Vec<(String, CompletionCategory)> = program
        .all_options()
        .map(|option| (option.joined_flags(), classify(option)))
        .collect();

    let expected = vec![
        ("-c --config", CompletionCategory::FilePath),
        ("-v --verbosity", CompletionCategory::Choice),
        ("--no-color", CompletionCategory::None),
        ("--legacy-mode", CompletionCategory::None),
        ("--progress", CompletionCategory::None),
        ("--compression", CompletionCategory::Choice),
        ("-a --match-archives", CompletionCategory::OpaqueRequired),
        ("--last", CompletionCategory::OpaqueRequired),
        ("--archive", CompletionCategory::OpaqueRequired),
        ("--destination", CompletionCategory::FilePath),
    ];
    let expected: Vec<(String, CompletionCategory)> = expected
        .into_iter()
        .map(|(flags, category)| (flags.to_string(), category))
        .collect();

    assert_eq!(categories, expected);
}

#[test]
fn test_every_directive_has_program_prefix() {
    let program = backup_program();

    for option in program.all_options() {
        let completion = exact_completion(&program.name, option);
        assert_eq!(!completion.is_empty(), has_exact_completion_kind(option));
        if !completion.is_empty() {
            assert!(completion.starts_with("\ncomplete -c backupctl"));
        }
    }
}

#[test]
fn test_fish_script_for_schema() {
    let script = fish_completion(&backup_program());

    assert!(script.starts_with("function __backupctl_check_version\n"));
    assert!(script.contains(
        "set --local action_parser_condition \"not __fish_seen_subcommand_from create list extract\""
    ));
    assert!(script.contains(
        "set --local exact_option_condition \"not __backupctl_current_arg -c --config -v --verbosity --compression -a --match-archives --last --archive --destination\""
    ));
    assert!(script.contains(
        "-a '-v --verbosity' -d 'Display verbose progress'\ncomplete -c backupctl -f -a '-1 0 1 2' -n \"__backupctl_current_arg -v --verbosity\""
    ));
    assert!(script.contains(
        "-a '--destination' -d 'Directory to extract into' -n \"__fish_seen_subcommand_from extract\"\ncomplete -c backupctl -Fr -n \"__backupctl_current_arg --destination\""
    ));
    assert!(!script.contains("-a '--legacy-mode'"));
    assert!(!script.contains("debug"));
}

#[test]
fn test_bash_script_for_schema() {
    let script = bash_completion(&backup_program());

    assert!(script.contains("grep -qw \"extract\""));
    assert!(script.contains(
        "compgen -W \"--archive --destination create list extract -c --config -v --verbosity --no-color\""
    ));
    assert!(
        script.ends_with("complete -o bashdefault -o default -F complete_backupctl backupctl\n")
    );
}
