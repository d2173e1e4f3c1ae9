//! Pocheck - gettext PO catalog checker
//!
//! Pocheck is a CLI tool and library for checking gettext translation
//! catalogs (PO files). It compiles each file to detect syntax errors and
//! validates every translated entry: line-count parity, whitespace placement,
//! trailing punctuation consistency, and optionally spelling.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, orchestration, exit status)
//! - `compiler`: Injected PO compiler capability (msgfmt in "check" mode)
//! - `config`: Configuration object, config file loading, environment defaults
//! - `core`: PO parsing engine (record reader, message model, header parser)
//! - `issues`: Issue type definitions and per-file aggregation
//! - `report`: Console report formatting
//! - `rules`: The per-message check pipeline
//! - `speller`: Spell-check provider (Hunspell dictionaries, word lists)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod compiler;
pub mod config;
pub mod core;
pub mod issues;
pub mod report;
pub mod rules;
pub mod speller;
pub mod utils;
