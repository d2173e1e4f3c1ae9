//! Spelling of source or translated text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SpellTarget;
use crate::core::PoMessage;
use crate::issues::{Issue, SpellingIssue};
use crate::speller::SpellSession;
use crate::utils::replace_formatters;

// letters with internal apostrophes; format specifiers are stripped before
// tokenizing so `%s` never reaches the dictionary
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+(?:['\u{2019}]\p{L}+)*").unwrap());

pub fn check(msg: &PoMessage, target: SpellTarget, session: &SpellSession) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (mid, mstr) in msg.pairs() {
        if mid.is_empty() || mstr.is_empty() {
            continue;
        }
        let text = match target {
            SpellTarget::Id => mid,
            SpellTarget::Str => mstr,
        };
        let text = match &msg.format {
            Some(fmt) => replace_formatters(text, fmt),
            None => text.to_string(),
        };

        let misspelled: BTreeSet<String> = WORD_RE
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|word| !session.check(word))
            .map(str::to_string)
            .collect();

        if !misspelled.is_empty() {
            issues.push(Issue::Spelling(SpellingIssue {
                line: msg.line,
                target,
                words: misspelled.into_iter().collect(),
                msgid: mid.to_string(),
                msgstr: mstr.to_string(),
            }));
        }
    }
    issues
}
