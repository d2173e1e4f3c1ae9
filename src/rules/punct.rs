//! End punctuation parity.
//!
//! The recognized punctuation lives in a data table pairing each western
//! mark with its full-width equivalent; the full-width forms are accepted in
//! translations for CJK catalogs. Trailing closing quotes and brackets are
//! stripped on both sides before comparing, and strings ending in a digit
//! are exempt (version numbers, ordinals).

use crate::core::PoMessage;
use crate::issues::{Issue, PunctIssue, PunctSide};

struct PunctPair {
    western: &'static str,
    cjk: &'static str,
}

// longest first, so "..." wins over "."
const PUNCT_TABLE: &[PunctPair] = &[
    PunctPair { western: "...", cjk: "..." },
    PunctPair { western: ":", cjk: "\u{ff1a}" },
    PunctPair { western: ";", cjk: "\u{ff1b}" },
    PunctPair { western: ",", cjk: "\u{ff0c}" },
    PunctPair { western: "!", cjk: "\u{ff01}" },
    PunctPair { western: "?", cjk: "\u{ff1f}" },
    PunctPair { western: ".", cjk: "\u{3002}" },
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{bb}', '\u{201d}', '\u{2019}'];

fn strip_closers(text: &str) -> &str {
    text.trim_end_matches(|c| CLOSERS.contains(&c))
}

fn ends_with_digit(text: &str) -> bool {
    text.chars().last().is_some_and(|c| c.is_ascii_digit())
}

fn end_punct(text: &str, accept_cjk: bool) -> Option<&'static PunctPair> {
    PUNCT_TABLE
        .iter()
        .find(|p| text.ends_with(p.western) || (accept_cjk && text.ends_with(p.cjk)))
}

fn is_cjk_language(language: &str) -> bool {
    matches!(language.get(..2), Some("ja") | Some("zh"))
}

pub fn check(msg: &PoMessage, language: &str) -> Vec<Issue> {
    let cjk = is_cjk_language(language);
    let mut issues = Vec::new();

    for (mid, mstr) in msg.pairs() {
        if mid.is_empty() || mstr.is_empty() {
            continue;
        }
        let id_text = strip_closers(mid);
        let str_text = strip_closers(mstr);
        if ends_with_digit(id_text) || ends_with_digit(str_text) {
            continue;
        }

        if let Some(p) = end_punct(id_text, false) {
            let matched = str_text.ends_with(p.western) || (cjk && str_text.ends_with(p.cjk));
            if !matched {
                issues.push(Issue::Punct(PunctIssue {
                    line: msg.line,
                    id_punct: p.western.to_string(),
                    str_punct: if cjk { p.cjk } else { p.western }.to_string(),
                    missing_in: PunctSide::Translation,
                    msgid: mid.to_string(),
                    msgstr: mstr.to_string(),
                }));
            }
        } else if let Some(q) = end_punct(str_text, cjk) {
            let found = if cjk && !str_text.ends_with(q.western) {
                q.cjk
            } else {
                q.western
            };
            issues.push(Issue::Punct(PunctIssue {
                line: msg.line,
                id_punct: q.western.to_string(),
                str_punct: found.to_string(),
                missing_in: PunctSide::Source,
                msgid: mid.to_string(),
                msgstr: mstr.to_string(),
            }));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::issues::Report;
    use crate::rules::punct::*;
    use crate::rules::tests::message;

    fn check_fr(msgid: &str, msgstr: &str) -> Vec<Issue> {
        check(&message(msgid, msgstr), "fr")
    }

    #[test]
    fn test_matching_punct_passes() {
        assert!(check_fr("error:", "erreur:").is_empty());
        assert!(check_fr("done.", "terminé.").is_empty());
        assert!(check_fr("plain", "simple").is_empty());
    }

    #[test]
    fn test_punct_only_in_translation() {
        let issues = check_fr("error", "erreur:");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message(),
            "end punctuation: \":\" in translation, \":\" not in string"
        );
    }

    #[test]
    fn test_punct_only_in_source() {
        let issues = check_fr("error:", "erreur");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message(),
            "end punctuation: \":\" in string, \":\" not in translation"
        );
    }

    #[test]
    fn test_ellipsis_wins_over_period() {
        assert!(check_fr("loading...", "chargement...").is_empty());

        let issues = check_fr("loading...", "chargement.");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message(),
            "end punctuation: \"...\" in string, \"...\" not in translation"
        );
    }

    #[test]
    fn test_period_satisfied_by_ellipsis() {
        assert!(check_fr("done.", "terminé...").is_empty());
    }

    #[test]
    fn test_digit_exemption() {
        assert!(check_fr("version 2.0", "version 2,0").is_empty());
    }

    #[test]
    fn test_closers_stripped_before_comparison() {
        assert!(check_fr("say \"stop\".", "dites \u{ab}stop\u{bb}.").is_empty());
        assert!(check_fr("done.", "\u{ab}termin\u{e9}.\u{bb}").is_empty());
    }

    #[test]
    fn test_digit_behind_closer_exempt() {
        assert!(check_fr("value (1)", "valeur (1).").is_empty());
    }

    #[test]
    fn test_cjk_fullwidth_accepted() {
        let msg = message("done.", "\u{5b8c}\u{6210}\u{3002}");
        assert!(check(&msg, "ja_JP").is_empty());
        assert!(check(&msg, "zh_CN").is_empty());

        // western catalogs do not accept the full-width form
        let issues = check(&msg, "fr");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_cjk_expected_form_in_message() {
        let issues = check(&message("done.", "\u{5b8c}\u{6210}"), "ja");
        assert_eq!(
            issues[0].message(),
            "end punctuation: \".\" in string, \"\u{3002}\" not in translation"
        );
    }
}
