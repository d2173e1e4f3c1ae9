//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CheckConfig, CheckKind, FileConfig, OPTIONS_ENV, SpellTarget};
use crate::report::OutputFormat;

const AFTER_HELP: &str = concat!(
    "Environment variable \"POCHECK_OPTIONS\" can be set with default options.\n",
    "\n",
    "The command returns:\n",
    "  0: all files checked are OK (or one of these options given:\n",
    "     --output-format={extract|misspelled} or --ignore-errors)\n",
    "  n: number of files with errors (1 <= n <= 255)\n",
);

/// Gettext PO file checker.
#[derive(Debug, Parser)]
#[command(author, version, about, after_help = AFTER_HELP)]
pub struct Arguments {
    /// Do not check compilation of file
    #[arg(short = 'c', long)]
    pub no_compile: bool,

    /// Check fuzzy strings
    #[arg(short = 'f', long)]
    pub fuzzy: bool,

    /// Raise an error if fuzzy strings are found
    #[arg(short = 'F', long)]
    pub error_on_fuzzy: bool,

    /// Check "noqa"-commented lines (they are skipped by default)
    #[arg(short = 'n', long)]
    pub check_noqa: bool,

    /// Do not check number of lines
    #[arg(short = 'l', long)]
    pub no_lines: bool,

    /// Do not check punctuation at end of strings
    #[arg(short = 'p', long)]
    pub no_punct: bool,

    /// Do not check whitespace at beginning/end of strings
    #[arg(short = 'w', long)]
    pub no_whitespace: bool,

    /// Do not check trailing whitespace at end of lines inside strings
    #[arg(short = 'W', long)]
    pub no_whitespace_eol: bool,

    /// Skip all other checks on a file whose compilation failed
    #[arg(short = 'C', long)]
    pub skip_on_compile_error: bool,

    /// Check spelling of source messages (id) or translations (str)
    #[arg(short = 's', long, value_enum, value_name = "TARGET")]
    pub spelling: Option<SpellTarget>,

    /// Comma-separated list of extra dictionaries to use (in addition to
    /// file language)
    #[arg(short = 'd', long, value_delimiter = ',', value_name = "DICT")]
    pub dicts: Vec<String>,

    /// File(s) with personal list of words used when checking spelling
    /// (this option can be given multiple times)
    #[arg(short = 'P', long = "pwl", value_name = "FILE")]
    pub pwl: Vec<PathBuf>,

    /// Directories searched for Hunspell dictionaries (<lang>.aff/<lang>.dic)
    #[arg(short = 'D', long = "dict-dir", value_name = "DIR")]
    pub dict_dirs: Vec<PathBuf>,

    /// Display all translations and exit (alias of --output-format=extract)
    #[arg(short = 'e', long)]
    pub extract: bool,

    /// Display only misspelled words (alias of --output-format=misspelled)
    #[arg(short = 'm', long)]
    pub only_misspelled: bool,

    /// Display but ignore errors (always return 0)
    #[arg(short = 'i', long)]
    pub ignore_errors: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "full")]
    pub output_format: OutputFormat,

    /// Quiet mode: only display number of errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Files or directories with gettext files (*.po)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Arguments {
    /// Output format after applying the alias flags.
    pub fn effective_format(&self) -> OutputFormat {
        if self.extract {
            OutputFormat::Extract
        } else if self.only_misspelled {
            OutputFormat::Misspelled
        } else {
            self.output_format
        }
    }

    /// Build the pipeline configuration from flags plus the optional
    /// config file (flags win over the file).
    pub fn to_config(&self, file: Option<FileConfig>) -> CheckConfig {
        let file = file.unwrap_or_default();

        let mut checks = CheckKind::all();
        for disabled in &file.disabled_checks {
            checks.remove(disabled);
        }
        let flag_disabled = [
            (self.no_compile, CheckKind::Compile),
            (self.no_lines, CheckKind::Lines),
            (self.no_whitespace, CheckKind::Whitespace),
            (self.no_whitespace_eol, CheckKind::WhitespaceEol),
            (self.no_punct, CheckKind::Punct),
        ];
        for (disabled, kind) in flag_disabled {
            if disabled {
                checks.remove(&kind);
            }
        }

        let mut dicts: Vec<String> = file.dicts;
        dicts.extend(self.dicts.iter().cloned());
        let mut pwl_files: Vec<PathBuf> = file.pwl.iter().map(PathBuf::from).collect();
        pwl_files.extend(self.pwl.iter().cloned());
        let mut dict_dirs: Vec<PathBuf> = file.dict_dirs.iter().map(PathBuf::from).collect();
        dict_dirs.extend(self.dict_dirs.iter().cloned());

        CheckConfig {
            checks,
            check_fuzzy: self.fuzzy,
            check_noqa: self.check_noqa,
            error_on_fuzzy: self.error_on_fuzzy,
            skip_on_compile_error: self.skip_on_compile_error,
            spelling: self.spelling,
            dicts,
            pwl_files,
            dict_dirs,
            ignore_errors: self.ignore_errors,
        }
    }
}

/// Insert default options from `POCHECK_OPTIONS` ahead of the explicit
/// arguments, so explicit flags take precedence.
pub fn merge_env_options(argv: Vec<String>) -> Vec<String> {
    let env_options = std::env::var(OPTIONS_ENV).unwrap_or_default();
    merge_options(argv, &env_options)
}

fn merge_options(mut argv: Vec<String>, env_options: &str) -> Vec<String> {
    let extra: Vec<String> = env_options.split_whitespace().map(str::to_string).collect();
    let at = 1.min(argv.len());
    argv.splice(at..at, extra);
    argv
}
