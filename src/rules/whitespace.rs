//! Leading and trailing whitespace parity.

use crate::core::PoMessage;
use crate::issues::{Issue, WhitespaceIssue, WhitespacePosition};
use crate::utils::count_lines;

fn leading_run(text: &str) -> usize {
    text.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

fn trailing_run(text: &str) -> usize {
    text.chars()
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
        // leading whitespace only matters on single-line sources; multi-line
        // strings often carry intentional indentation
        if count_lines(mid) == 1 {
            let id_count = leading_run(mid);
            let str_count = leading_run(mstr);
            if id_count != str_count {
                issues.push(Issue::Whitespace(WhitespaceIssue {
                    line: msg.line,
                    position: WhitespacePosition::Beginning,
                    id_count,
                    str_count,
                    msgid: mid.to_string(),
                    msgstr: mstr.to_string(),
                }));
            }
        }
        let id_count = trailing_run(mid);
        let str_count = trailing_run(mstr);
        if id_count != str_count {
            issues.push(Issue::Whitespace(WhitespaceIssue {
                line: msg.line,
                position: WhitespacePosition::End,
                id_count,
                str_count,
                msgid: mid.to_string(),
                msgstr: mstr.to_string(),
            }));
        }
    }
    issues
}
