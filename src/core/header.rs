//! Header/metadata parser.
//!
//! The distinguished empty-id entry of a catalog carries `Key: Value` lines
//! in its translation body. Two fields drive checking behavior: `Language`
//! selects the spelling dictionary and punctuation rules, and `Plural-Forms`
//! declares the expected number of translation slots. Only the
//! `nplurals=<N>` portion of the plural expression is parsed; the expression
//! itself is never evaluated.

use std::sync::LazyLock;

use regex::Regex;

static CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)charset=([a-zA-Z0-9_-]+)").unwrap());

static NPLURALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nplurals\s*=\s*(\d+)").unwrap());

/// Catalog metadata from the header entry.
///
/// An absent or unrecognized `Language` leaves the field empty: the checks
/// then behave neutrally (no language-specific punctuation, no
/// language-derived dictionary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Header fields in file order.
    pub entries: Vec<(String, String)>,
    pub language: String,
    /// Line number of the header entry (used to place soft findings).
    pub language_line: usize,
    pub charset: String,
    /// Slot count from `Plural-Forms: nplurals=N; ...`, when declared.
    pub nplurals: Option<usize>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            language: String::new(),
            language_line: 0,
            charset: "utf-8".to_string(),
            nplurals: None,
        }
    }
}

impl Metadata {
    /// Parse the header entry's translation body.
    pub fn parse(msgstr: &str, line: usize) -> Metadata {
        let mut metadata = Metadata {
            language_line: line,
            ..Metadata::default()
        };

        for header_line in msgstr.lines() {
            let Some((key, value)) = header_line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_string();
            let value = value.trim().to_string();

            if key.eq_ignore_ascii_case("language") {
                metadata.language = value.clone();
            } else if key.eq_ignore_ascii_case("plural-forms") {
                metadata.nplurals = NPLURALS_RE
                    .captures(&value)
                    .and_then(|c| c[1].parse().ok());
            } else if key.eq_ignore_ascii_case("content-type")
                && let Some(c) = CHARSET_RE.captures(&value)
            {
                metadata.charset = c[1].to_string();
            }
            metadata.entries.push((key, value));
        }

        metadata
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Find the declared charset anywhere in raw (possibly lossily decoded)
/// text. Used before full decoding, since the charset governs it.
pub fn sniff_charset(text: &str) -> String {
    CHARSET_RE
        .captures(text)
        .map_or_else(|| "utf-8".to_string(), |c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::header::*;

    const HEADER: &str = "Project-Id-Version: test 1.0\n\
        Language: fr_FR\n\
        Content-Type: text/plain; charset=UTF-8\n\
        Plural-Forms: nplurals=2; plural=(n > 1);\n";

    #[test]
    fn test_parse_header() {
        let metadata = Metadata::parse(HEADER, 2);
        assert_eq!(metadata.language, "fr_FR");
        assert_eq!(metadata.language_line, 2);
        assert_eq!(metadata.charset, "UTF-8");
        assert_eq!(metadata.nplurals, Some(2));
        assert_eq!(metadata.get("Project-Id-Version"), Some("test 1.0"));
    }

    #[test]
    fn test_missing_language_is_neutral() {
        let metadata = Metadata::parse("Content-Type: text/plain; charset=UTF-8\n", 1);
        assert_eq!(metadata.language, "");
        assert_eq!(metadata.nplurals, None);
    }

    #[test]
    fn test_case_insensitive_keys() {
        let metadata = Metadata::parse("language: de\nPLURAL-FORMS: nplurals=4; plural=n;\n", 1);
        assert_eq!(metadata.language, "de");
        assert_eq!(metadata.nplurals, Some(4));
    }

    #[test]
    fn test_plural_expression_not_evaluated() {
        let metadata = Metadata::parse(
            "Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : 2);\n",
            1,
        );
        assert_eq!(metadata.nplurals, Some(3));
    }

    #[test]
    fn test_default_charset() {
        let metadata = Metadata::parse("Language: it\n", 1);
        assert_eq!(metadata.charset, "utf-8");
    }

    #[test]
    fn test_sniff_charset() {
        assert_eq!(sniff_charset("charset=ISO-8859-1"), "ISO-8859-1");
        assert_eq!(sniff_charset("no charset here"), "utf-8");
    }

    #[test]
    fn test_entries_keep_file_order() {
        let metadata = Metadata::parse("B: 2\nA: 1\n", 1);
        let keys: Vec<&str> = metadata.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }
}
