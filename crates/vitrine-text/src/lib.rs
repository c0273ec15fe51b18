// SPDX-License-Identifier: MIT OR Apache-2.0
//! vitrine-text
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Focused text layout helpers for rendering diagnostic messages.

/// Strips the common leading whitespace from every line of `input`.
///
/// Multi-line literals written inside an indented function body carry their
/// source indentation with them. `dedent` removes exactly the shared prefix
/// so the rendered text sits flush with the left margin:
///
/// ```
/// let raw = "
///     Couldn't resolve the entry.
///     - Check the id.";
/// assert_eq!(
///     vitrine_text::dedent(raw),
///     "Couldn't resolve the entry.\n- Check the id."
/// );
/// ```
///
/// Blank lines do not contribute to the shared prefix and come out empty.
/// Leading and trailing blank lines are dropped, so a literal may open with
/// a newline purely for source readability. Only ASCII spaces and tabs count
/// as indentation.
pub fn dedent(input: &str) -> String {
    let common = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_width)
        .min()
        .unwrap_or(0);

    let mut lines: Vec<&str> = input
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common..]
            }
        })
        .collect();

    while lines.first() == Some(&"") {
        lines.remove(0);
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Byte width of the leading ASCII-whitespace run of `line`.
fn indent_width(line: &str) -> usize {
    line.bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
