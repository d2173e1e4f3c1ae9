//! Trailing-whitespace parity at internal line breaks.
//!
//! Only applies to multi-line strings whose line counts already match (the
//! lines check owns the count mismatch). Every offending boundary is
//! reported, not just the first.

use crate::core::PoMessage;
use crate::issues::{Issue, WhitespaceEolIssue};

fn trailing_spaces(line: &str) -> usize {
    line.chars()
        .rev()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
}

pub fn check(msg: &PoMessage) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (mid, mstr) in msg.pairs() {
        if mid.is_empty() || mstr.is_empty() {
            continue;
        }
        let id_lines: Vec<&str> = mid.split('\n').collect();
        let str_lines: Vec<&str> = mstr.split('\n').collect();
        if id_lines.len() < 2 || id_lines.len() != str_lines.len() {
            continue;
        }
        // last line's trailing run belongs to the whitespace check
        for (i, (id_line, str_line)) in
            id_lines.iter().zip(&str_lines).enumerate().take(id_lines.len() - 1)
        {
            let id_count = trailing_spaces(id_line);
            let str_count = trailing_spaces(str_line);
            if (id_count > 0 || str_count > 0) && id_count != str_count {
                issues.push(Issue::WhitespaceEol(WhitespaceEolIssue {
                    line: msg.line,
                    boundary: i,
                    id_count,
                    str_count,
                    msgid: mid.to_string(),
                    msgstr: mstr.to_string(),
                }));
            }
        }
    }
    issues
}
