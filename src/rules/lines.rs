//! Line-count parity between source and translation.

use crate::core::PoMessage;
use crate::issues::{Issue, LinesIssue};
use crate::utils::count_lines;

pub fn check(msg: &PoMessage) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (mid, mstr) in msg.pairs() {
        if mid.is_empty() || mstr.is_empty() {
            continue;
        }
        let id_lines = count_lines(mid);
        let str_lines = count_lines(mstr);
        if id_lines != str_lines {
            issues.push(Issue::Lines(LinesIssue {
                line: msg.line,
                id_lines,
                str_lines,
                msgid: mid.to_string(),
                msgstr: mstr.to_string(),
            }));
        }
    }
    issues
}
