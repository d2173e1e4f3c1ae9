//! External compilation of the PO file.
//!
//! Catches syntax errors and format-string inconsistencies the other checks
//! never look at. Failure to run the compiler at all (not installed) is
//! reported the same way as a rejected file.

use std::path::Path;

use crate::compiler::{CompileOutcome, Compiler};
use crate::issues::{CompileIssue, Issue};

pub fn check(compiler: &dyn Compiler, path: &Path) -> Option<Issue> {
    match compiler.compile(path) {
        Ok(CompileOutcome::Ok) => None,
        Ok(CompileOutcome::Failed(output)) => Some(Issue::Compile(CompileIssue { output })),
        Err(err) => Some(Issue::Compile(CompileIssue {
            output: format!("{err:#}"),
        })),
    }
}
