//! Run orchestration: expand inputs, check files in parallel, report.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::cli::args::Arguments;
use crate::cli::exit_status::ExitStatus;
use crate::compiler::MsgfmtCompiler;
use crate::config::{CheckConfig, load_file_config};
use crate::core::Catalog;
use crate::issues::RunResult;
use crate::report::{OutputFormat, extract_to, report_to};
use crate::rules::{CheckContext, check_file};
use crate::speller::SpellBank;

pub fn run(args: Arguments) -> Result<ExitStatus> {
    let format = args.effective_format();
    let file_config = load_file_config(&std::env::current_dir()?)?;
    let config = args.to_config(file_config);
    let files = collect_files(&args.files);

    let mut stdout = io::stdout().lock();

    if format == OutputFormat::Extract {
        return run_extract(&mut stdout, &files);
    }

    // spelling resources load before any file is checked, so a bad
    // configuration fails fast
    let spell_bank = match config.spelling {
        Some(_) => Some(SpellBank::from_config(&config)?),
        None => None,
    };
    let compiler = MsgfmtCompiler;
    let ctx = CheckContext {
        config: &config,
        compiler: &compiler,
        spell_bank: spell_bank.as_ref(),
    };

    // one parallel unit per file; collect preserves input order
    let reports = files
        .par_iter()
        .map(|path| check_file(&ctx, path))
        .collect();
    let result = RunResult::new(reports);

    report_to(&mut stdout, &result, format, args.quiet)?;
    Ok(run_status(&result, &config, format))
}

/// Expand directory arguments to the `*.po` files inside them, sorted for
/// deterministic order. Plain file arguments pass through untouched (a
/// missing file surfaces as a read issue later).
pub fn collect_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| {
                    entry.file_type().is_file()
                        && entry.path().extension().is_some_and(|ext| ext == "po")
                })
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    files
}

fn run_extract<W: Write>(out: &mut W, files: &[PathBuf]) -> Result<ExitStatus> {
    for path in files {
        if let Err(err) = extract_file(out, path) {
            eprintln!("{}: {err:#}", path.display());
        }
    }
    Ok(ExitStatus::Success)
}

fn extract_file<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    let bytes = fs::read(path)?;
    let catalog = Catalog::parse(&path.display().to_string(), &bytes)?;
    extract_to(out, &catalog)?;
    Ok(())
}

fn run_status(result: &RunResult, config: &CheckConfig, format: OutputFormat) -> ExitStatus {
    if config.ignore_errors || matches!(format, OutputFormat::Misspelled) {
        return ExitStatus::Success;
    }
    ExitStatus::from_error_count(result.files_with_errors())
}
