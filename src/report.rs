//! Console output for check results.
//!
//! All functions write to a generic writer so tests can capture output.
//! The `full` format prints one separator block per issue with the source
//! and translation below it, then a per-file summary and a TOTAL line;
//! `oneline` prints one compact line per issue; `misspelled` prints only
//! the misspelled words; `extract` dumps translations and skips checking
//! output entirely.

use std::io::{self, Write};

use clap::ValueEnum;
use colored::Colorize;

use crate::core::Catalog;
use crate::issues::{Issue, Report, Rule, RunResult, Severity};

const SEPARATOR_WIDTH: usize = 70;

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Complete output with excerpts and summary.
    Full,
    /// One line per issue.
    Oneline,
    /// Display all translations (checks other than compile are disabled).
    Extract,
    /// Display only misspelled words.
    Misspelled,
}

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

fn issue_tag(issue: &Issue) -> String {
    let words = issue.misspelled_words();
    let count = if words.is_empty() {
        String::new()
    } else {
        format!("({})", words.len())
    };
    format!("[{}{}]", issue.rule(), count)
}

fn issue_line(path: &str, issue: &Issue) -> String {
    let tag = match issue.severity() {
        Severity::Error => issue_tag(issue).red(),
        Severity::Warning => issue_tag(issue).yellow(),
    };
    format!("{}:{}: {} {}", path, issue.line(), tag, issue.message())
}

fn write_issue_full<W: Write>(out: &mut W, path: &str, issue: &Issue) -> io::Result<()> {
    writeln!(out, "{}", separator())?;
    // compiler diagnostics already carry file/line prefixes
    if issue.rule() == Rule::Compile {
        return writeln!(out, "{}", issue.message());
    }
    writeln!(out, "{}", issue_line(path, issue))?;
    if let Some((mid, mstr)) = issue.excerpt() {
        if !mid.is_empty() {
            writeln!(out, "---\n{mid}")?;
        }
        if !mstr.is_empty() {
            writeln!(out, "---\n{mstr}")?;
        }
    }
    Ok(())
}

fn write_issue_oneline<W: Write>(out: &mut W, path: &str, issue: &Issue) -> io::Result<()> {
    if issue.rule() == Rule::Compile {
        let first = issue.message();
        let first = first.lines().next().unwrap_or_default();
        return writeln!(out, "{first}");
    }
    writeln!(out, "{}", issue_line(path, issue))
}

fn write_misspelled<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    for report in &result.reports {
        let mut words: Vec<&str> = report
            .issues
            .iter()
            .flat_map(|i| i.misspelled_words())
            .map(String::as_str)
            .collect();
        words.sort_by_key(|w| w.to_lowercase());
        words.dedup();
        for word in words {
            writeln!(out, "{word}")?;
        }
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, result: &RunResult, quiet: bool) -> io::Result<()> {
    if result.total_errors() > 0 && !quiet {
        writeln!(out, "{}", separator())?;
    }
    for report in &result.reports {
        let errors = report.error_count();
        if errors == 0 {
            writeln!(out, "{}: {}", report.path, "OK".green())?;
        } else {
            let verdict = if errors <= 10 {
                "almost good!"
            } else {
                "uh oh... try again!"
            };
            let status = format!("{errors} errors ({verdict})");
            writeln!(out, "{}: {}", report.path, status.red())?;
        }
    }

    let files_with_errors = result.files_with_errors();
    let trailer = if files_with_errors > 0 {
        format!(
            ", {} files with {} errors",
            files_with_errors,
            result.total_errors()
        )
    } else {
        String::new()
    };
    writeln!(out, "TOTAL: {} files OK{}", result.files_ok(), trailer)
}

/// Write the run result in the requested format. The `extract` format is
/// rendered per catalog with [`extract_to`] instead.
pub fn report_to<W: Write>(
    out: &mut W,
    result: &RunResult,
    format: OutputFormat,
    quiet: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Full => {
            if !quiet {
                for report in &result.reports {
                    for issue in &report.issues {
                        write_issue_full(out, &report.path, issue)?;
                    }
                }
            }
            write_summary(out, result, quiet)
        }
        OutputFormat::Oneline => {
            if !quiet {
                for report in &result.reports {
                    for issue in &report.issues {
                        write_issue_oneline(out, &report.path, issue)?;
                    }
                }
            }
            Ok(())
        }
        OutputFormat::Misspelled => {
            if quiet {
                return Ok(());
            }
            write_misspelled(out, result)
        }
        OutputFormat::Extract => Ok(()),
    }
}

/// Dump every translation of a catalog, one `---`-terminated block each.
pub fn extract_to<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for msg in &catalog.messages {
        if msg.obsolete {
            continue;
        }
        for slot in &msg.msgstr {
            if !slot.is_empty() {
                writeln!(out, "{slot}\n---")?;
            }
        }
    }
    Ok(())
}
