//! The per-file check pipeline.
//!
//! One file in, one [`FileReport`] out. File-level checks run first
//! (compile, then parsing/encoding), then every message goes through the
//! enabled checks in a fixed order: lines, whitespace, whitespace_eol,
//! punct, spelling. The skip policy lives here, not in the individual
//! checks.

pub mod compile;
pub mod lines;
pub mod punct;
pub mod spelling;
pub mod whitespace;
pub mod whitespace_eol;

use std::fs;
use std::path::Path;

use crate::compiler::Compiler;
use crate::config::{CheckConfig, CheckKind, SpellTarget};
use crate::core::{Catalog, PoMessage};
use crate::issues::{
    DictIssue, EncodingIssue, FileReport, FuzzyIssue, Issue, PluralFormsIssue, ReadIssue,
};
use crate::speller::{SpellBank, SpellSession};

/// Everything the pipeline needs besides the file itself. Built once per
/// run and shared by reference across worker threads.
pub struct CheckContext<'a> {
    pub config: &'a CheckConfig,
    pub compiler: &'a dyn Compiler,
    /// Present only when the spelling check is configured.
    pub spell_bank: Option<&'a SpellBank>,
}

/// Check one file from disk. A read failure becomes a `read` issue in the
/// report rather than an error, so a bad file never aborts a batch.
pub fn check_file(ctx: &CheckContext, path: &Path) -> FileReport {
    match fs::read(path) {
        Ok(bytes) => check_bytes(ctx, path, &bytes),
        Err(err) => {
            let mut report = FileReport::new(path.display().to_string());
            report.issues.push(Issue::Read(ReadIssue {
                error: err.to_string(),
            }));
            report
        }
    }
}

/// Check file content already in memory. `path` still identifies the file
/// for the report and for the external compiler.
pub fn check_bytes(ctx: &CheckContext, path: &Path, bytes: &[u8]) -> FileReport {
    let mut report = FileReport::new(path.display().to_string());

    if ctx.config.is_enabled(CheckKind::Compile) {
        let failed = match compile::check(ctx.compiler, path) {
            Some(issue) => {
                report.issues.push(issue);
                true
            }
            None => false,
        };
        if failed && ctx.config.skip_on_compile_error {
            return report;
        }
    }

    let catalog = match Catalog::parse(&report.path, bytes) {
        Ok(catalog) => catalog,
        Err(err) => {
            // nothing decodable, the message checks cannot run
            report.issues.push(Issue::Encoding(EncodingIssue {
                charset: err.charset,
                detail: err.detail,
            }));
            return report;
        }
    };

    let spelling = resolve_spelling(ctx, &catalog, &mut report);
    for msg in &catalog.messages {
        check_message(ctx, &catalog, msg, spelling.as_ref(), &mut report);
    }
    report
}

/// Resolve the spelling session for this file's language. A missing or
/// unloadable language dictionary yields a soft `dict` warning and
/// disables spelling for the file only.
fn resolve_spelling(
    ctx: &CheckContext,
    catalog: &Catalog,
    report: &mut FileReport,
) -> Option<(SpellTarget, SpellSession)> {
    let target = ctx.config.spelling?;
    let bank = ctx.spell_bank?;

    let language = match target {
        SpellTarget::Id => "en".to_string(),
        SpellTarget::Str => catalog.metadata.language.clone(),
    };
    let session = if language.is_empty() {
        Ok(None)
    } else {
        bank.session(&language)
    };
    match session {
        Ok(Some(session)) => Some((target, session)),
        Ok(None) => {
            report.issues.push(Issue::Dict(DictIssue {
                language,
                line: catalog.metadata.language_line,
                error: None,
            }));
            None
        }
        // the dictionary exists but did not load; keep its failure detail
        Err(err) => {
            report.issues.push(Issue::Dict(DictIssue {
                language,
                line: catalog.metadata.language_line,
                error: Some(format!("{err:#}")),
            }));
            None
        }
    }
}

fn check_message(
    ctx: &CheckContext,
    catalog: &Catalog,
    msg: &PoMessage,
    spelling: Option<&(SpellTarget, SpellSession)>,
    report: &mut FileReport,
) {
    let config = ctx.config;
    if msg.obsolete {
        return;
    }
    if msg.fuzzy && config.error_on_fuzzy {
        report.issues.push(Issue::Fuzzy(FuzzyIssue {
            line: msg.line,
            msgid: msg.msgid.clone(),
            msgstr: msg.msgstr.first().cloned().unwrap_or_default(),
        }));
    }
    if msg.fuzzy && !config.check_fuzzy {
        return;
    }
    if msg.noqa && !config.check_noqa {
        return;
    }
    if !msg.is_translated() {
        return;
    }

    if msg.has_plural()
        && let Some(expected) = catalog.metadata.nplurals
        && msg.msgstr.len() != expected
    {
        report.issues.push(Issue::PluralForms(PluralFormsIssue {
            line: msg.line,
            expected,
            found: msg.msgstr.len(),
        }));
    }

    if config.is_enabled(CheckKind::Lines) {
        report.issues.extend(lines::check(msg));
    }
    if config.is_enabled(CheckKind::Whitespace) {
        report.issues.extend(whitespace::check(msg));
    }
    if config.is_enabled(CheckKind::WhitespaceEol) {
        report.issues.extend(whitespace_eol::check(msg));
    }
    if config.is_enabled(CheckKind::Punct) {
        report
            .issues
            .extend(punct::check(msg, &catalog.metadata.language));
    }
    if let Some((target, session)) = spelling {
        report.issues.extend(spelling::check(msg, *target, session));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use crate::compiler::CompileOutcome;
    use crate::issues::{Report, Rule, Severity};
    use crate::rules::*;
    use crate::speller::{SpellLookup, SpellResolver};

    pub fn message(msgid: &str, msgstr: &str) -> PoMessage {
        PoMessage {
            line: 1,
            msgid: msgid.to_string(),
            msgid_plural: None,
            msgctxt: None,
            msgstr: vec![msgstr.to_string()],
            fuzzy: false,
            noqa: false,
            obsolete: false,
            format: None,
        }
    }

    pub fn plural_message(msgid: &str, plural: &str, msgstr: &[&str]) -> PoMessage {
        PoMessage {
            line: 1,
            msgid: msgid.to_string(),
            msgid_plural: Some(plural.to_string()),
            msgctxt: None,
            msgstr: msgstr.iter().map(|s| s.to_string()).collect(),
            fuzzy: false,
            noqa: false,
            obsolete: false,
            format: None,
        }
    }

    pub struct FixedCompiler(pub CompileOutcome);

    impl Compiler for FixedCompiler {
        fn compile(&self, _path: &Path) -> Result<CompileOutcome> {
            Ok(self.0.clone())
        }
    }

    struct FakeLookup(HashSet<String>);

    impl SpellLookup for FakeLookup {
        fn check(&self, word: &str) -> bool {
            self.0.contains(word)
        }
    }

    struct FakeResolver(HashMap<String, Arc<dyn SpellLookup>>);

    struct BrokenDictResolver;

    impl SpellResolver for BrokenDictResolver {
        fn resolve(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>> {
            anyhow::bail!("Failed to parse dictionary \"{language}.dic\": invalid flag")
        }
    }

    impl SpellResolver for FakeResolver {
        fn resolve(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>> {
            Ok(self.0.get(language).cloned())
        }
    }

    fn spell_bank(languages: &[(&str, &[&str])]) -> SpellBank {
        let map: HashMap<String, Arc<dyn SpellLookup>> = languages
            .iter()
            .map(|(lang, words)| {
                let lookup: Arc<dyn SpellLookup> =
                    Arc::new(FakeLookup(words.iter().map(|w| w.to_string()).collect()));
                (lang.to_string(), lookup)
            })
            .collect();
        SpellBank::assemble(Arc::new(FakeResolver(map)), &CheckConfig::default()).unwrap()
    }

    fn check_source(config: &CheckConfig, source: &str) -> FileReport {
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let ctx = CheckContext {
            config,
            compiler: &compiler,
            spell_bank: None,
        };
        check_bytes(&ctx, Path::new("test.po"), source.as_bytes())
    }

    const HEADER: &str = concat!(
        "msgid \"\"\n",
        "msgstr \"\"\n",
        "\"Language: fr\\n\"\n",
        "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
        "\"Plural-Forms: nplurals=2; plural=(n > 1);\\n\"\n",
        "\n",
    );

    #[test]
    fn test_clean_file_has_no_issues() {
        let source = format!("{HEADER}msgid \"error:\"\nmsgstr \"erreur:\"\n");
        let report = check_source(&CheckConfig::default(), &source);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_issue_order_per_message() {
        // one message violating lines, whitespace and punct at once
        let source = format!(
            "{HEADER}msgid \" error:\"\nmsgstr \"erreur\\nencore\"\n"
        );
        let report = check_source(&CheckConfig::default(), &source);
        let rules: Vec<Rule> = report.issues.iter().map(Report::rule).collect();
        assert_eq!(rules, vec![Rule::Lines, Rule::Whitespace, Rule::Punct]);
    }

    #[test]
    fn test_fuzzy_skipped_by_default() {
        let source = format!("{HEADER}#, fuzzy\nmsgid \"error\"\nmsgstr \"erreur:\"\n");
        let report = check_source(&CheckConfig::default(), &source);
        assert!(report.issues.is_empty());

        let config = CheckConfig {
            check_fuzzy: true,
            ..CheckConfig::default()
        };
        let report = check_source(&config, &source);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Punct);
    }

    #[test]
    fn test_error_on_fuzzy() {
        let source = format!("{HEADER}#, fuzzy\nmsgid \"ok\"\nmsgstr \"bon\"\n");
        let config = CheckConfig {
            error_on_fuzzy: true,
            ..CheckConfig::default()
        };
        let report = check_source(&config, &source);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Fuzzy);
        assert_eq!(report.issues[0].line(), 8);
    }

    #[test]
    fn test_noqa_skipped_by_default() {
        let source = format!("{HEADER}# noqa\nmsgid \"error\"\nmsgstr \"erreur:\"\n");
        let report = check_source(&CheckConfig::default(), &source);
        assert!(report.issues.is_empty());

        let config = CheckConfig {
            check_noqa: true,
            ..CheckConfig::default()
        };
        assert_eq!(check_source(&config, &source).issues.len(), 1);
    }

    #[test]
    fn test_obsolete_always_skipped() {
        let source = format!(
            "{HEADER}#~ msgid \"error\"\n#~ msgstr \"erreur:\"\n"
        );
        let config = CheckConfig {
            check_fuzzy: true,
            check_noqa: true,
            ..CheckConfig::default()
        };
        assert!(check_source(&config, &source).issues.is_empty());
    }

    #[test]
    fn test_untranslated_skipped() {
        let source = format!("{HEADER}msgid \"error:\"\nmsgstr \"\"\n");
        assert!(check_source(&CheckConfig::default(), &source).issues.is_empty());
    }

    #[test]
    fn test_plural_forms_mismatch() {
        let source = format!(
            "{HEADER}msgid \"%d file\"\nmsgid_plural \"%d files\"\nmsgstr[0] \"%d fichier\"\n"
        );
        let report = check_source(&CheckConfig::default(), &source);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::PluralForms);
        assert_eq!(
            report.issues[0].message(),
            "number of plural translations: 2 declared in header, 1 in message"
        );
    }

    #[test]
    fn test_disabled_check_not_run() {
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"erreur:\"\n");
        let mut config = CheckConfig::default();
        config.checks.remove(&CheckKind::Punct);
        assert!(check_source(&config, &source).issues.is_empty());
    }

    #[test]
    fn test_compile_failure_does_not_stop_message_checks() {
        let compiler = FixedCompiler(CompileOutcome::Failed("boom".to_string()));
        let config = CheckConfig::default();
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: None,
        };
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"erreur:\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        let rules: Vec<Rule> = report.issues.iter().map(Report::rule).collect();
        assert_eq!(rules, vec![Rule::Compile, Rule::Punct]);
    }

    #[test]
    fn test_skip_on_compile_error() {
        let compiler = FixedCompiler(CompileOutcome::Failed("boom".to_string()));
        let config = CheckConfig {
            skip_on_compile_error: true,
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: None,
        };
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"erreur:\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Compile);
    }

    #[test]
    fn test_encoding_error_is_recoverable() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"msgid \"a\"\nmsgstr \"\xff\"\n");
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig::default();
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: None,
        };
        let report = check_bytes(&ctx, Path::new("test.po"), &bytes);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Encoding);
    }

    #[test]
    fn test_missing_file_is_read_issue() {
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig {
            checks: HashSet::new(),
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: None,
        };
        let report = check_file(&ctx, &PathBuf::from("/nonexistent/x.po"));
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Read);
    }

    #[test]
    fn test_spelling_uses_file_language() {
        let bank = spell_bank(&[("fr", &["erreur"])]);
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig {
            spelling: Some(SpellTarget::Str),
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: Some(&bank),
        };
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"errur\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::SpellingStr);
        assert_eq!(report.issues[0].misspelled_words(), ["errur".to_string()]);
    }

    #[test]
    fn test_missing_language_dict_is_soft_warning() {
        let bank = spell_bank(&[("en", &["error"])]);
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig {
            spelling: Some(SpellTarget::Str),
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: Some(&bank),
        };
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"errur\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Dict);
        assert_eq!(report.issues[0].severity(), Severity::Warning);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_unloadable_language_dict_keeps_load_error() {
        let bank =
            SpellBank::assemble(Arc::new(BrokenDictResolver), &CheckConfig::default()).unwrap();
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig {
            spelling: Some(SpellTarget::Str),
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: Some(&bank),
        };
        let source = format!("{HEADER}msgid \"error\"\nmsgstr \"errur\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::Dict);
        assert_eq!(report.issues[0].severity(), Severity::Warning);
        assert_eq!(
            report.issues[0].message(),
            "dictionary for language \"fr\" could not be loaded: \
             Failed to parse dictionary \"fr.dic\": invalid flag"
        );
    }

    #[test]
    fn test_spelling_id_uses_english() {
        let bank = spell_bank(&[("en", &["error"])]);
        let compiler = FixedCompiler(CompileOutcome::Ok);
        let config = CheckConfig {
            spelling: Some(SpellTarget::Id),
            ..CheckConfig::default()
        };
        let ctx = CheckContext {
            config: &config,
            compiler: &compiler,
            spell_bank: Some(&bank),
        };
        let source = format!("{HEADER}msgid \"eror\"\nmsgstr \"erreur\"\n");
        let report = check_bytes(&ctx, Path::new("test.po"), source.as_bytes());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].rule(), Rule::SpellingId);
    }
}
