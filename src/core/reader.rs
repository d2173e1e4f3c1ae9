//! Line-level record reader for PO files.
//!
//! Scans raw file text line by line and groups comment markers, flag lines,
//! keyword lines (`msgctxt`, `msgid`, `msgid_plural`, `msgstr`, `msgstr[N]`)
//! and quoted continuation lines into raw message blocks. String values are
//! kept escaped here; unescaping happens in the message model builder.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+(?:\[\d+\])?)[ \t](.*)$").unwrap());

static FORMAT_FLAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z-]+)-format").unwrap());

/// One raw message block, as found in the file.
///
/// `parts` maps each keyword (`msgid`, `msgstr`, `msgstr[0]`, ...) to its
/// concatenated, still-escaped string content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlock {
    /// 1-based line number where the block starts (its first keyword line).
    pub line: usize,
    pub fuzzy: bool,
    pub noqa: bool,
    pub obsolete: bool,
    /// Format flag without the `-format` suffix (e.g. `c`, `python`).
    pub format: Option<String>,
    pub parts: HashMap<String, String>,
}

/// Streaming reader: feed lines one by one, collect finished blocks.
#[derive(Debug, Default)]
pub struct RecordReader {
    numline: usize,
    block_line: usize,
    // flags seen since the last finished block
    fuzzy: bool,
    noqa: bool,
    format: Option<String>,
    // flags attached to the block currently being read
    msg_fuzzy: bool,
    msg_noqa: bool,
    msg_obsolete: bool,
    msg_format: Option<String>,
    parts: HashMap<String, String>,
    current: String,
    previous: String,
}

impl RecordReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw line; returns the previous block when this line
    /// starts a new entry.
    pub fn feed_line(&mut self, raw_line: &str) -> Option<RawBlock> {
        self.numline += 1;
        let mut line = raw_line.trim();

        // obsolete entries are kept as commented-out history ("#~ msgid ...")
        let obsolete_line = if let Some(rest) = line.strip_prefix("#~") {
            line = rest.trim_start();
            true
        } else {
            false
        };

        if line.is_empty() {
            return None;
        }

        if !obsolete_line && line.starts_with('#') {
            if line.starts_with("#,") {
                self.fuzzy = line.contains("fuzzy");
                self.format = FORMAT_FLAG_RE
                    .captures(line)
                    .map(|c| c[1].to_ascii_lowercase());
            }
            self.noqa = self.noqa || line.contains("noqa");
            return None;
        }

        let mut finished = None;
        if line.starts_with("msg")
            && let Some(captures) = KEYWORD_RE.captures(line)
        {
            let keyword = captures[1].to_string();
            let rest = captures.get(2).map_or("", |m| m.as_str()).to_string();
            self.previous = std::mem::replace(&mut self.current, keyword);
            // a msgctxt or msgid after a msgstr starts the next entry
            let starts_entry = self.current == "msgctxt"
                || (self.current == "msgid" && self.previous != "msgctxt");
            if starts_entry {
                if self.previous.starts_with("msgstr") {
                    finished = Some(self.take_block());
                }
                self.msg_fuzzy = self.fuzzy;
                self.msg_noqa = self.noqa;
                self.msg_format = self.format.take();
                self.msg_obsolete = obsolete_line;
                self.fuzzy = false;
                self.noqa = false;
                self.parts.clear();
                self.block_line = self.numline;
            }
            self.append_quoted(&rest);
            return finished;
        }

        if line.starts_with('"') {
            self.append_quoted(line);
        }
        None
    }

    /// Consume the last block after all lines were read.
    pub fn finish(&mut self) -> Option<RawBlock> {
        if self.current.starts_with("msgstr") {
            self.current.clear();
            Some(self.take_block())
        } else {
            None
        }
    }

    fn append_quoted(&mut self, text: &str) {
        if self.current.is_empty() || !text.starts_with('"') {
            return;
        }
        let inner = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(&text[1..]);
        self.parts
            .entry(self.current.clone())
            .or_default()
            .push_str(inner);
    }

    fn take_block(&mut self) -> RawBlock {
        RawBlock {
            line: self.block_line,
            fuzzy: self.msg_fuzzy,
            noqa: self.msg_noqa,
            obsolete: self.msg_obsolete,
            format: self.msg_format.take(),
            parts: std::mem::take(&mut self.parts),
        }
    }
}

/// Read all blocks from decoded file text.
pub fn read_blocks(text: &str) -> Vec<RawBlock> {
    let mut reader = RecordReader::new();
    let mut blocks = Vec::new();
    for line in text.lines() {
        if let Some(block) = reader.feed_line(line) {
            blocks.push(block);
        }
    }
    if let Some(block) = reader.finish() {
        blocks.push(block);
    }
    blocks
}
