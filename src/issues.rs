//! Issue types for PO check results.
//!
//! This module defines all issue types the check pipeline can emit. Each
//! issue is self-contained with all information needed by the reporting
//! layer: line number, human-readable message, and the implicated source
//! and translation text.

use enum_dispatch::enum_dispatch;

use crate::config::SpellTarget;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    Read,
    Compile,
    Encoding,
    Dict,
    Fuzzy,
    PluralForms,
    Lines,
    Whitespace,
    WhitespaceEol,
    Punct,
    SpellingId,
    SpellingStr,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Read => write!(f, "read"),
            Rule::Compile => write!(f, "compile"),
            Rule::Encoding => write!(f, "encoding"),
            Rule::Dict => write!(f, "dict"),
            Rule::Fuzzy => write!(f, "fuzzy"),
            Rule::PluralForms => write!(f, "plural-forms"),
            Rule::Lines => write!(f, "lines"),
            Rule::Whitespace => write!(f, "whitespace"),
            Rule::WhitespaceEol => write!(f, "whitespace_eol"),
            Rule::Punct => write!(f, "punct"),
            Rule::SpellingId => write!(f, "spelling-id"),
            Rule::SpellingStr => write!(f, "spelling-str"),
        }
    }
}

// ============================================================
// Issue Types - File Level
// ============================================================

/// File could not be read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadIssue {
    pub error: String,
}

/// The external PO compiler rejected the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileIssue {
    /// Diagnostic text from the compiler.
    pub output: String,
}

/// The byte stream is invalid under the catalog's declared charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingIssue {
    pub charset: String,
    pub detail: String,
}

/// No spelling dictionary could be used for the catalog language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictIssue {
    pub language: String,
    pub line: usize,
    /// Load failure detail when a dictionary was found but unusable.
    pub error: Option<String>,
}

// ============================================================
// Issue Types - Per Message
// ============================================================

/// A fuzzy message, reported when fuzzy strings are treated as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyIssue {
    pub line: usize,
    pub msgid: String,
    pub msgstr: String,
}

/// Translation slot count differs from the header's `nplurals` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralFormsIssue {
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// Line-count mismatch between source and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesIssue {
    pub line: usize,
    pub id_lines: usize,
    pub str_lines: usize,
    pub msgid: String,
    pub msgstr: String,
}

/// Which end of the string a whitespace mismatch was found at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespacePosition {
    Beginning,
    End,
}

impl std::fmt::Display for WhitespacePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WhitespacePosition::Beginning => write!(f, "beginning"),
            WhitespacePosition::End => write!(f, "end"),
        }
    }
}

/// Leading or trailing whitespace runs differ between source and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitespaceIssue {
    pub line: usize,
    pub position: WhitespacePosition,
    pub id_count: usize,
    pub str_count: usize,
    pub msgid: String,
    pub msgstr: String,
}

/// Trailing whitespace before an internal line break differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitespaceEolIssue {
    pub line: usize,
    /// 0-based index of the offending internal line.
    pub boundary: usize,
    pub id_count: usize,
    pub str_count: usize,
    pub msgid: String,
    pub msgstr: String,
}

/// Which side is missing the end punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctSide {
    Source,
    Translation,
}

/// End punctuation mismatch between source and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunctIssue {
    pub line: usize,
    /// Punctuation found (or expected) in the source.
    pub id_punct: String,
    /// Punctuation found (or expected) in the translation.
    pub str_punct: String,
    /// The side the punctuation is missing from.
    pub missing_in: PunctSide,
    pub msgid: String,
    pub msgstr: String,
}

/// Misspelled words found in one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingIssue {
    pub line: usize,
    pub target: SpellTarget,
    /// Sorted unique misspelled words.
    pub words: Vec<String>,
    pub msgid: String,
    pub msgstr: String,
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to the CLI.
///
/// Implemented by all issue types to provide a consistent interface for the
/// report functions. Uses `enum_dispatch` for zero-cost dispatch on the
/// `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Rule identifier.
    fn rule(&self) -> Rule;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn severity(&self) -> Severity {
        Severity::Error
    }

    /// 1-based line number of the implicated entry (0 for file-level issues).
    fn line(&self) -> usize {
        0
    }

    /// Source and translation text for the "---" display blocks.
    fn excerpt(&self) -> Option<(&str, &str)> {
        None
    }

    /// Misspelled words, for the misspelled-only output format.
    fn misspelled_words(&self) -> &[String] {
        &[]
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// One problem detected in a PO file.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Read(ReadIssue),
    Compile(CompileIssue),
    Encoding(EncodingIssue),
    Dict(DictIssue),
    Fuzzy(FuzzyIssue),
    PluralForms(PluralFormsIssue),
    Lines(LinesIssue),
    Whitespace(WhitespaceIssue),
    WhitespaceEol(WhitespaceEolIssue),
    Punct(PunctIssue),
    Spelling(SpellingIssue),
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ReadIssue {
    fn rule(&self) -> Rule {
        Rule::Read
    }

    fn message(&self) -> String {
        self.error.clone()
    }
}

impl Report for CompileIssue {
    fn rule(&self) -> Rule {
        Rule::Compile
    }

    fn message(&self) -> String {
        self.output.clone()
    }
}

impl Report for EncodingIssue {
    fn rule(&self) -> Rule {
        Rule::Encoding
    }

    fn message(&self) -> String {
        format!("invalid {} byte stream: {}", self.charset, self.detail)
    }
}

impl Report for DictIssue {
    fn rule(&self) -> Rule {
        Rule::Dict
    }

    fn message(&self) -> String {
        match &self.error {
            Some(error) => format!(
                "dictionary for language \"{}\" could not be loaded: {}",
                self.language, error
            ),
            None => format!("dictionary not found for language \"{}\"", self.language),
        }
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl Report for FuzzyIssue {
    fn rule(&self) -> Rule {
        Rule::Fuzzy
    }

    fn message(&self) -> String {
        "fuzzy string".to_string()
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }
}

impl Report for PluralFormsIssue {
    fn rule(&self) -> Rule {
        Rule::PluralForms
    }

    fn message(&self) -> String {
        format!(
            "number of plural translations: {} declared in header, {} in message",
            self.expected, self.found
        )
    }

    fn line(&self) -> usize {
        self.line
    }
}

impl Report for LinesIssue {
    fn rule(&self) -> Rule {
        Rule::Lines
    }

    fn message(&self) -> String {
        format!(
            "number of lines: {} in string, {} in translation",
            self.id_lines, self.str_lines
        )
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }
}

impl Report for WhitespaceIssue {
    fn rule(&self) -> Rule {
        Rule::Whitespace
    }

    fn message(&self) -> String {
        format!(
            "whitespace at {}: {} in string, {} in translation",
            self.position, self.id_count, self.str_count
        )
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }
}

impl Report for WhitespaceEolIssue {
    fn rule(&self) -> Rule {
        Rule::WhitespaceEol
    }

    fn message(&self) -> String {
        format!(
            "different whitespace at end of line {}: {} in string, {} in translation",
            self.boundary + 1,
            self.id_count,
            self.str_count
        )
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }
}

impl Report for PunctIssue {
    fn rule(&self) -> Rule {
        Rule::Punct
    }

    fn message(&self) -> String {
        match self.missing_in {
            PunctSide::Translation => format!(
                "end punctuation: \"{}\" in string, \"{}\" not in translation",
                self.id_punct, self.str_punct
            ),
            PunctSide::Source => format!(
                "end punctuation: \"{}\" in translation, \"{}\" not in string",
                self.str_punct, self.id_punct
            ),
        }
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }
}

impl Report for SpellingIssue {
    fn rule(&self) -> Rule {
        match self.target {
            SpellTarget::Id => Rule::SpellingId,
            SpellTarget::Str => Rule::SpellingStr,
        }
    }

    fn message(&self) -> String {
        self.words.join(", ")
    }

    fn line(&self) -> usize {
        self.line
    }

    fn excerpt(&self) -> Option<(&str, &str)> {
        Some((&self.msgid, &self.msgstr))
    }

    fn misspelled_words(&self) -> &[String] {
        &self.words
    }
}

// ============================================================
// Per-File Aggregation
// ============================================================

/// All issues found in one file, in discovery order (file-level issues
/// first, then by message line number ascending).
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub path: String,
    pub issues: Vec<Issue>,
}

impl FileReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            issues: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Aggregate over all processed files, in input order.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
}

impl RunResult {
    pub fn new(reports: Vec<FileReport>) -> Self {
        Self { reports }
    }

    pub fn files_ok(&self) -> usize {
        self.reports.len() - self.files_with_errors()
    }

    /// Count of files containing at least one error; drives the exit status.
    pub fn files_with_errors(&self) -> usize {
        self.reports.iter().filter(|r| r.has_errors()).count()
    }

    pub fn total_errors(&self) -> usize {
        self.reports.iter().map(FileReport::error_count).sum()
    }
}

// ============================================================
// Tests
// ============================================================
