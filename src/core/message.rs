//! Message model builder.
//!
//! Converts a raw block from the record reader into a structured
//! [`PoMessage`]: unescaped text, plural slots, flags and position.

use crate::core::reader::RawBlock;
use crate::utils::unescape;

/// One translatable unit from a gettext file.
///
/// Translations are stored as a list of slots: one slot for a singular-only
/// message, one per plural form otherwise. [`PoMessage::pairs`] yields the
/// (source, translation) pairs the checks operate on; for plural messages
/// every slot is paired with `msgid_plural`:
///
/// ```text
/// #, c-format
/// msgid "%d file found"
/// msgid_plural "%d files found"
/// msgstr[0] "%d fichier trouvé"
/// msgstr[1] "%d fichiers trouvés"
///
/// ==>  [("%d files found", "%d fichier trouvé"),
///       ("%d files found", "%d fichiers trouvés")]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoMessage {
    /// 1-based line number where the entry starts in the raw file.
    pub line: usize,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgctxt: Option<String>,
    /// Translation slots; a missing plural slot is kept as an empty string.
    pub msgstr: Vec<String>,
    pub fuzzy: bool,
    pub noqa: bool,
    pub obsolete: bool,
    /// Format flag without the `-format` suffix (e.g. `c`, `python`).
    pub format: Option<String>,
}

impl PoMessage {
    /// Build a message from a raw block. Returns `None` for blocks without
    /// a `msgid` (malformed input the compile check will flag).
    pub fn from_block(mut block: RawBlock) -> Option<PoMessage> {
        let msgid = unescape(&block.parts.remove("msgid")?);
        let msgid_plural = block.parts.remove("msgid_plural").map(|s| unescape(&s));

        let msgstr = if msgid_plural.is_some() {
            let max_slot = block
                .parts
                .keys()
                .filter_map(|k| {
                    k.strip_prefix("msgstr[")
                        .and_then(|rest| rest.strip_suffix(']'))
                        .and_then(|n| n.parse::<usize>().ok())
                })
                .max();
            match max_slot {
                Some(max) => (0..=max)
                    .map(|i| {
                        block
                            .parts
                            .remove(&format!("msgstr[{i}]"))
                            .map(|s| unescape(&s))
                            .unwrap_or_default()
                    })
                    .collect(),
                None => vec![String::new()],
            }
        } else {
            vec![
                block
                    .parts
                    .remove("msgstr")
                    .map(|s| unescape(&s))
                    .unwrap_or_default(),
            ]
        };

        Some(PoMessage {
            line: block.line,
            msgid,
            msgid_plural,
            msgctxt: block.parts.remove("msgctxt").map(|s| unescape(&s)),
            msgstr,
            fuzzy: block.fuzzy,
            noqa: block.noqa,
            obsolete: block.obsolete,
            format: block.format,
        })
    }

    /// The distinguished metadata entry has an empty msgid and no context.
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none()
    }

    pub fn has_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// True if at least one translation slot is non-empty.
    pub fn is_translated(&self) -> bool {
        self.msgstr.iter().any(|s| !s.is_empty())
    }

    /// (source, translation) pairs, one per translation slot.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        match &self.msgid_plural {
            Some(plural) => self
                .msgstr
                .iter()
                .map(|s| (plural.as_str(), s.as_str()))
                .collect(),
            None => self
                .msgstr
                .iter()
                .map(|s| (self.msgid.as_str(), s.as_str()))
                .collect(),
        }
    }
}
