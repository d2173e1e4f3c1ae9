//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

/// Format-specifier patterns per format flag (`c-format`, `python-format`,
/// `python-brace-format`). Each entry is applied in order: literal `%%` is
/// folded to `%` before specifiers are stripped.
static C_FORMATTERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"%{2}").unwrap(), "%"),
        (
            Regex::new(r"%([ hlL\d\.\-\+\#\*]+)?[cdieEfgGosuxXpn]").unwrap(),
            "",
        ),
    ]
});

static PYTHON_FORMATTERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"%{2}").unwrap(), "%"),
        (
            Regex::new(r"%(\([^)]*\))?([.\d]+)?[bcdeEfFgGnosxX]").unwrap(),
            "",
        ),
    ]
});

static PYTHON_BRACE_FORMATTERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![(Regex::new(r"\{([^:\}]*)?(:[^\}]*)?\}").unwrap(), "")]
});

/// Count the number of lines in a string or translation.
///
/// A trailing newline does not count as an extra line, so `"a\n"` has one
/// line while `"a\nb"` has two.
pub fn count_lines(text: &str) -> usize {
    let count = text.split('\n').count();
    if count > 1 && text.ends_with('\n') {
        count - 1
    } else {
        count
    }
}

/// Replace format specifiers (like `%s`, `%03d` or `{name}`) with nothing so
/// they are never fed to the spell checker.
///
/// Unknown format flags leave the text untouched.
pub fn replace_formatters(text: &str, format: &str) -> String {
    let rules = match format {
        "c" => &*C_FORMATTERS,
        "python" => &*PYTHON_FORMATTERS,
        "python-brace" => &*PYTHON_BRACE_FORMATTERS,
        _ => return text.to_string(),
    };
    let mut out = text.to_string();
    for (pattern, replacement) in rules {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// Unescape PO string-literal escape sequences.
///
/// Handles `\n`, `\r`, `\t`, `\"` and `\\`; any other escape is kept
/// verbatim, matching what the gettext tools tolerate.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut it = text.chars().peekable();
    while let Some(ch) = it.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match it.peek().copied() {
            Some('n') => {
                out.push('\n');
                it.next();
            }
            Some('r') => {
                out.push('\r');
                it.next();
            }
            Some('t') => {
                out.push('\t');
                it.next();
            }
            Some('"') => {
                out.push('"');
                it.next();
            }
            Some('\\') => {
                out.push('\\');
                it.next();
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
                it.next();
            }
            None => out.push('\\'),
        }
    }
    out
}
