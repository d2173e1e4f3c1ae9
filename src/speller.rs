//! Spelling dictionaries.
//!
//! Spelling support is split in two seams: [`SpellLookup`] is one loaded
//! dictionary that can answer "is this word correct", and [`SpellResolver`]
//! turns a language code into a lookup. The production resolver loads
//! Hunspell `.aff`/`.dic` pairs through `spellbook`; pipeline tests use
//! in-memory fakes for both traits.
//!
//! Failure policy: dictionaries and word lists named explicitly in the
//! configuration must load, so a failure there aborts the run. A missing
//! dictionary for a *file's* header language is only a per-file warning,
//! since one catalog in an exotic language should not kill a batch run.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, anyhow};

use crate::config::CheckConfig;

/// One loaded dictionary.
pub trait SpellLookup: Send + Sync {
    /// True if the word is spelled correctly.
    fn check(&self, word: &str) -> bool;
}

/// Turns a language code into a dictionary.
pub trait SpellResolver: Send + Sync {
    /// Resolve a lookup for a language code. `Ok(None)` means no dictionary
    /// exists for that language; `Err` means a dictionary was found but
    /// could not be loaded.
    fn resolve(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>>;
}

// ============================================================
// Hunspell dictionaries
// ============================================================

/// A Hunspell dictionary pair loaded with `spellbook`.
pub struct HunspellDictionary {
    dict: spellbook::Dictionary,
}

impl HunspellDictionary {
    pub fn load(aff_path: &Path, dic_path: &Path) -> Result<HunspellDictionary> {
        let aff = fs::read_to_string(aff_path)
            .with_context(|| format!("Failed to read {:?}", aff_path))?;
        let dic = fs::read_to_string(dic_path)
            .with_context(|| format!("Failed to read {:?}", dic_path))?;
        let dict = spellbook::Dictionary::new(&aff, &dic)
            .map_err(|err| anyhow!("Failed to parse dictionary {:?}: {}", dic_path, err))?;
        Ok(HunspellDictionary { dict })
    }
}

impl SpellLookup for HunspellDictionary {
    fn check(&self, word: &str) -> bool {
        self.dict.check(word)
    }
}

/// Resolver that searches configured directories for `<lang>.aff`/`.dic`
/// pairs, with a fallback from `fr_FR` to `fr`. Loaded dictionaries are
/// cached so parallel file checks share them.
pub struct DictionaryBank {
    dict_dirs: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Option<Arc<dyn SpellLookup>>>>,
}

impl DictionaryBank {
    pub fn new(dict_dirs: Vec<PathBuf>) -> DictionaryBank {
        DictionaryBank {
            dict_dirs,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn find_pair(&self, language: &str) -> Option<(PathBuf, PathBuf)> {
        for dir in &self.dict_dirs {
            let aff = dir.join(format!("{language}.aff"));
            let dic = dir.join(format!("{language}.dic"));
            if aff.is_file() && dic.is_file() {
                return Some((aff, dic));
            }
        }
        None
    }

    fn load(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>> {
        let pair = self.find_pair(language).or_else(|| {
            // fall back from a full locale to its primary subtag
            language
                .split_once(['_', '-'])
                .and_then(|(primary, _)| self.find_pair(primary))
        });
        match pair {
            Some((aff, dic)) => {
                let dict = HunspellDictionary::load(&aff, &dic)?;
                Ok(Some(Arc::new(dict)))
            }
            None => Ok(None),
        }
    }
}

impl SpellResolver for DictionaryBank {
    fn resolve(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>> {
        if let Some(cached) = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(language)
        {
            return Ok(cached.clone());
        }
        let loaded = self.load(language)?;
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(language.to_string(), loaded.clone());
        Ok(loaded)
    }
}

// ============================================================
// Personal word lists
// ============================================================

/// Personal word list: one word per line, `#` comments and blanks ignored.
/// Matching is case-insensitive.
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn load(path: &Path) -> Result<WordList> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {:?}", path))?;
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Ok(WordList { words })
    }
}

impl SpellLookup for WordList {
    fn check(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

// ============================================================
// Per-run bank and per-file sessions
// ============================================================

/// All spelling resources of one run: the language resolver plus the
/// always-on lookups (configured extra dictionaries and word lists).
pub struct SpellBank {
    resolver: Arc<dyn SpellResolver>,
    extras: Vec<Arc<dyn SpellLookup>>,
}

impl SpellBank {
    /// Build the bank from the run configuration. Dictionaries and word
    /// lists named in the configuration must load.
    pub fn from_config(config: &CheckConfig) -> Result<SpellBank> {
        let resolver: Arc<dyn SpellResolver> =
            Arc::new(DictionaryBank::new(config.dict_dirs.clone()));
        Self::assemble(resolver, config)
    }

    /// Same as [`SpellBank::from_config`] with an injected resolver.
    pub fn assemble(resolver: Arc<dyn SpellResolver>, config: &CheckConfig) -> Result<SpellBank> {
        let mut extras: Vec<Arc<dyn SpellLookup>> = Vec::new();
        for name in &config.dicts {
            let dict = resolver
                .resolve(name)?
                .ok_or_else(|| anyhow!("dictionary not found: {name}"))?;
            extras.push(dict);
        }
        for path in &config.pwl_files {
            extras.push(Arc::new(WordList::load(path)?));
        }
        Ok(SpellBank { resolver, extras })
    }

    /// Resolve the lookup set for one file's language. `Ok(None)` means the
    /// language has no dictionary (the caller reports that and skips the
    /// spelling check for the file).
    pub fn session(&self, language: &str) -> Result<Option<SpellSession>> {
        let Some(dict) = self.resolver.resolve(language)? else {
            return Ok(None);
        };
        let mut lookups = vec![dict];
        lookups.extend(self.extras.iter().cloned());
        Ok(Some(SpellSession { lookups }))
    }
}

/// The lookups consulted for one file: language dictionary first, then
/// extra dictionaries and word lists. A word is correct if any accepts it.
pub struct SpellSession {
    lookups: Vec<Arc<dyn SpellLookup>>,
}

impl SpellSession {
    pub fn new(lookups: Vec<Arc<dyn SpellLookup>>) -> SpellSession {
        SpellSession { lookups }
    }

    pub fn check(&self, word: &str) -> bool {
        self.lookups.iter().any(|l| l.check(word))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::speller::*;

    /// In-memory lookup accepting a fixed word set.
    pub struct FakeLookup(pub HashSet<String>);

    impl FakeLookup {
        pub fn of(words: &[&str]) -> Arc<dyn SpellLookup> {
            Arc::new(FakeLookup(words.iter().map(|w| w.to_string()).collect()))
        }
    }

    impl SpellLookup for FakeLookup {
        fn check(&self, word: &str) -> bool {
            self.0.contains(word)
        }
    }

    /// Resolver backed by a fixed language map.
    pub struct FakeResolver(pub HashMap<String, Arc<dyn SpellLookup>>);

    impl SpellResolver for FakeResolver {
        fn resolve(&self, language: &str) -> Result<Option<Arc<dyn SpellLookup>>> {
            Ok(self.0.get(language).cloned())
        }
    }

    fn bank_with(languages: &[(&str, &[&str])]) -> SpellBank {
        let map = languages
            .iter()
            .map(|(lang, words)| (lang.to_string(), FakeLookup::of(words)))
            .collect();
        SpellBank::assemble(Arc::new(FakeResolver(map)), &CheckConfig::default()).unwrap()
    }

    #[test]
    fn test_session_checks_language_dict() {
        let bank = bank_with(&[("fr", &["bonjour"])]);
        let session = bank.session("fr").unwrap().unwrap();
        assert!(session.check("bonjour"));
        assert!(!session.check("bonjoru"));
    }

    #[test]
    fn test_unknown_language_resolves_to_none() {
        let bank = bank_with(&[("fr", &["bonjour"])]);
        assert!(bank.session("xx").unwrap().is_none());
    }

    #[test]
    fn test_configured_dict_must_exist() {
        let config = CheckConfig {
            dicts: vec!["de".to_string()],
            ..CheckConfig::default()
        };
        let result = SpellBank::assemble(
            Arc::new(FakeResolver(HashMap::new())),
            &config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_word_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "# project jargon\nPocheck\n\nmsgstr\n").unwrap();

        let list = WordList::load(&path).unwrap();
        assert!(list.check("pocheck"));
        assert!(list.check("Pocheck"));
        assert!(list.check("msgstr"));
        assert!(!list.check("jargon"));
    }

    #[test]
    fn test_missing_word_list_fails() {
        let config = CheckConfig {
            pwl_files: vec![PathBuf::from("/nonexistent/words.txt")],
            ..CheckConfig::default()
        };
        let result = SpellBank::assemble(Arc::new(FakeResolver(HashMap::new())), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_dictionary_bank_locale_fallback() {
        let bank = DictionaryBank::new(vec![PathBuf::from("/nonexistent")]);
        // no dictionaries on disk, both forms resolve to None
        assert!(bank.resolve("fr_FR").unwrap().is_none());
        assert!(bank.resolve("fr").unwrap().is_none());
    }
}
