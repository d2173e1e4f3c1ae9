//! Configuration for a check run.
//!
//! The pipeline never reads global or environment state directly: all options
//! are assembled once at process start into a [`CheckConfig`] (merging the
//! optional config file, `POCHECK_OPTIONS` environment defaults and explicit
//! CLI flags) and passed by reference into the pipeline.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".pocheckrc.json";

/// Name of the environment variable holding default CLI options.
pub const OPTIONS_ENV: &str = "POCHECK_OPTIONS";

/// One togglable check of the pipeline.
///
/// The pipeline evaluates a fixed ordered list of check implementations
/// against the set of enabled identifiers; spelling is configured separately
/// because it needs a target and dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Compile,
    Lines,
    Whitespace,
    WhitespaceEol,
    Punct,
}

impl CheckKind {
    pub fn all() -> HashSet<CheckKind> {
        HashSet::from([
            CheckKind::Compile,
            CheckKind::Lines,
            CheckKind::Whitespace,
            CheckKind::WhitespaceEol,
            CheckKind::Punct,
        ])
    }
}

/// Which side of a message the spell checker inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellTarget {
    /// Source messages (English).
    Id,
    /// Translated messages (catalog language).
    Str,
}

impl std::fmt::Display for SpellTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpellTarget::Id => write!(f, "id"),
            SpellTarget::Str => write!(f, "str"),
        }
    }
}

/// The explicit configuration object handed to the check pipeline.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Enabled checks.
    pub checks: HashSet<CheckKind>,
    /// Also check fuzzy messages (skipped by default).
    pub check_fuzzy: bool,
    /// Also check `noqa`-commented messages (skipped by default).
    pub check_noqa: bool,
    /// Report every fuzzy message as an error.
    pub error_on_fuzzy: bool,
    /// Skip the remaining checks on a file whose compilation failed.
    pub skip_on_compile_error: bool,
    /// Spelling target, `None` disables the spelling check.
    pub spelling: Option<SpellTarget>,
    /// Extra dictionaries used in addition to the file language.
    pub dicts: Vec<String>,
    /// Personal word-list files.
    pub pwl_files: Vec<PathBuf>,
    /// Directories searched for `<lang>.aff`/`<lang>.dic` dictionaries.
    pub dict_dirs: Vec<PathBuf>,
    /// Display but ignore errors (exit status is always success).
    pub ignore_errors: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            checks: CheckKind::all(),
            check_fuzzy: false,
            check_noqa: false,
            error_on_fuzzy: false,
            skip_on_compile_error: false,
            spelling: None,
            dicts: Vec::new(),
            pwl_files: Vec::new(),
            dict_dirs: Vec::new(),
            ignore_errors: false,
        }
    }
}

impl CheckConfig {
    pub fn is_enabled(&self, check: CheckKind) -> bool {
        self.checks.contains(&check)
    }
}

/// Optional `.pocheckrc.json` config file contents.
///
/// The file supplies defaults that explicit CLI flags can extend or override.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Directories searched for Hunspell dictionaries.
    #[serde(default)]
    pub dict_dirs: Vec<String>,
    /// Extra dictionaries always used for spelling.
    #[serde(default)]
    pub dicts: Vec<String>,
    /// Personal word-list files.
    #[serde(default)]
    pub pwl: Vec<String>,
    /// Checks disabled by default.
    #[serde(default)]
    pub disabled_checks: Vec<CheckKind>,
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load the config file found upward from `start_dir`, if any.
pub fn load_file_config(start_dir: &Path) -> Result<Option<FileConfig>> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: FileConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}
