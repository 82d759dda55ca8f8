//! Indented text blocks
//!
//! Script templates are written as indented literals so they read naturally in the
//! source; `dedent_lines` turns them back into the lines that go into the script.

/// Remove the indentation shared by all non-blank lines and the blank lines around
/// the block
///
/// Whitespace-only lines come back empty. Blank-only input yields no lines.
pub fn dedent_lines(text: &str) -> Vec<&str> {
    let margin = common_margin(text);

    let lines: Vec<&str> = text
        .lines()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect();

    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].to_vec(),
        _ => Vec::new(),
    }
}

/// Dedent a block and join it back with newlines
pub fn dedent(text: &str) -> String {
    dedent_lines(text).join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Longest leading-whitespace prefix shared by every non-blank line
fn common_margin(text: &str) -> &str {
    let mut margin: Option<&str> = None;

    for line in text.lines().filter(|line| !is_blank(line)) {
        let indent = &line[..line.len() - line.trim_start().len()];

        margin = Some(match margin {
            None => indent,
            Some(current) => {
                let shared = current
                    .char_indices()
                    .zip(indent.chars())
                    .find(|((_, a), b)| a != b)
                    .map(|((i, _), _)| i)
                    .unwrap_or_else(|| current.len().min(indent.len()));
                &current[..shared]
            }
        });
    }

    margin.unwrap_or("")
}
