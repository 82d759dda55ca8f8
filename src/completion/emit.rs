//! Fish completion directives for single options

use crate::completion::classify::{classify, CompletionCategory};
use crate::completion::descriptor::OptionDescriptor;

/// Name of the fish helper that checks whether the previous word is one of its arguments
pub fn current_arg_function(program: &str) -> String {
    format!("__{}_current_arg", program)
}

/// Directive forcing the right kind of value completion after an option is typed
///
/// Returns an empty string for options that need no directive, including options
/// without any flags. Otherwise the result starts with a newline followed by
/// `complete -c <program>`, so directives can be appended to an existing entry.
pub fn exact_completion(program: &str, option: &OptionDescriptor) -> String {
    if option.flags.is_empty() {
        return String::new();
    }

    let condition = format!(
        "-n \"{} {}\"",
        current_arg_function(program),
        option.joined_flags()
    );

    match classify(option) {
        CompletionCategory::FilePath => {
            format!("\ncomplete -c {} -Fr {}", program, condition)
        }
        CompletionCategory::Choice => {
            let choices = option
                .choices
                .iter()
                .flatten()
                .map(|choice| escape_single_quoted(choice))
                .collect::<Vec<_>>()
                .join(" ");
            format!("\ncomplete -c {} -f -a '{}' {}", program, choices, condition)
        }
        CompletionCategory::OpaqueRequired => {
            format!("\ncomplete -c {} -x {}", program, condition)
        }
        CompletionCategory::None => String::new(),
    }
}

/// Escape text for use inside fish single quotes
pub fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Wrap text in fish single quotes
pub fn single_quoted(text: &str) -> String {
    format!("'{}'", escape_single_quoted(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::classify::has_exact_completion_kind;
    use crate::completion::descriptor::{Arity, ValueType};

    const PROGRAM: &str = "backupctl";

    fn flag() -> OptionDescriptor {
        OptionDescriptor::new(["--flag"])
    }

    #[test]
    fn test_plain_option_emits_nothing() {
        assert_eq!(exact_completion(PROGRAM, &flag()), "");
        assert_eq!(
            exact_completion(PROGRAM, &flag().with_arity(Arity::Zero)),
            ""
        );
    }

    #[test]
    fn test_non_empty_iff_exact_kind() {
        let options = vec![
            flag(),
            flag().with_hint("PATH"),
            flag().with_hint("OTHER"),
            flag().with_choices(["a", "b"]),
            flag().with_required(true),
            flag().with_arity(Arity::OneOrMore),
            flag().with_value_type(ValueType::Integer),
            flag().with_value_type(ValueType::Integer).with_default("1"),
            flag().with_destination("config_paths"),
        ];

        for option in options {
            let completion = exact_completion(PROGRAM, &option);
            if has_exact_completion_kind(&option) {
                assert!(
                    completion.starts_with("\ncomplete -c backupctl"),
                    "Completion should start with \"complete -c backupctl\", got {}",
                    completion
                );
            } else {
                assert_eq!(completion, "", "Completion should be empty for {:?}", option);
            }
        }
    }

    #[test]
    fn test_file_path_clause() {
        let option = OptionDescriptor::new(["-c", "--config"]).with_hint("PATH");
        assert_eq!(
            exact_completion(PROGRAM, &option),
            "\ncomplete -c backupctl -Fr -n \"__backupctl_current_arg -c --config\""
        );
    }

    #[test]
    fn test_file_path_takes_precedence_over_opaque() {
        let option = flag()
            .with_hint("PATH")
            .with_value_type(ValueType::String)
            .with_required(true);
        let completion = exact_completion(PROGRAM, &option);

        assert!(completion.contains(" -Fr "));
        assert!(!completion.contains(" -x "));
    }

    #[test]
    fn test_choice_clause_keeps_order() {
        let option = flag().with_choices(["b", "a", "c"]);
        assert_eq!(
            exact_completion(PROGRAM, &option),
            "\ncomplete -c backupctl -f -a 'b a c' -n \"__backupctl_current_arg --flag\""
        );
    }

    #[test]
    fn test_choice_takes_precedence_over_opaque() {
        let option = flag()
            .with_choices(["a", "b"])
            .with_value_type(ValueType::String);
        let completion = exact_completion(PROGRAM, &option);

        assert!(completion.contains("-f -a 'a b'"));
        assert!(!completion.contains(" -x "));
    }

    #[test]
    fn test_choice_quotes_are_escaped() {
        let option = flag().with_choices(["it's", r"back\slash"]);
        let completion = exact_completion(PROGRAM, &option);
        assert!(completion.contains(r"-a 'it\'s back\\slash'"));
    }

    #[test]
    fn test_opaque_clause() {
        let option = OptionDescriptor::new(["-a", "--match-archives"]).with_hint("PATTERN");
        assert_eq!(
            exact_completion(PROGRAM, &option),
            "\ncomplete -c backupctl -x -n \"__backupctl_current_arg -a --match-archives\""
        );
    }

    #[test]
    fn test_option_without_flags_emits_nothing() {
        let option = OptionDescriptor::new(Vec::<String>::new()).with_required(true);
        assert_eq!(exact_completion(PROGRAM, &option), "");
    }

    #[test]
    fn test_single_quoted() {
        assert_eq!(single_quoted(""), "''");
        assert_eq!(single_quoted("two words"), "'two words'");
        assert_eq!(single_quoted("don't"), r"'don\'t'");
        assert_eq!(single_quoted(r"ends with \"), r"'ends with \\'");
    }
}
