//! External PO compiler integration.
//!
//! The compile check shells out to `msgfmt -c`, which validates syntax and
//! format-string consistency far beyond what the parser here needs to know.
//! The pipeline only depends on the [`Compiler`] trait so tests can swap in
//! a fake that never touches the system.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Result of one compilation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Ok,
    /// Compiler rejected the file; carries its diagnostic output.
    Failed(String),
}

/// Compiles a PO file for validation purposes.
pub trait Compiler: Send + Sync {
    fn compile(&self, path: &Path) -> Result<CompileOutcome>;
}

/// The real compiler: `msgfmt -c` from GNU gettext, output discarded.
#[derive(Debug, Default)]
pub struct MsgfmtCompiler;

impl MsgfmtCompiler {
    #[cfg(windows)]
    const DEV_NULL: &'static str = "NUL";
    #[cfg(not(windows))]
    const DEV_NULL: &'static str = "/dev/null";
}

impl Compiler for MsgfmtCompiler {
    fn compile(&self, path: &Path) -> Result<CompileOutcome> {
        let output = Command::new("msgfmt")
            .arg("-c")
            .arg("-o")
            .arg(Self::DEV_NULL)
            .arg(path)
            .output()
            .context("failed to run msgfmt (is gettext installed?)")?;

        if output.status.success() {
            return Ok(CompileOutcome::Ok);
        }

        // msgfmt writes diagnostics to stderr
        let mut diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();
        if diagnostic.trim().is_empty() {
            diagnostic = format!("msgfmt exited with {}", output.status);
        }
        Ok(CompileOutcome::Failed(diagnostic))
    }
}
