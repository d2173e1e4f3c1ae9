//! Catalog assembly: byte decoding, block reading, message building.

use crate::core::header::{Metadata, sniff_charset};
use crate::core::message::PoMessage;
use crate::core::reader::read_blocks;

/// A parsed gettext file: metadata plus the ordered message sequence.
/// Immutable after parse.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub path: String,
    pub metadata: Metadata,
    pub messages: Vec<PoMessage>,
}

/// Decoding failure: the bytes are not valid under the catalog's declared
/// charset. Recoverable at the file level, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingError {
    pub charset: String,
    pub detail: String,
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} byte stream: {}", self.charset, self.detail)
    }
}

impl std::error::Error for EncodingError {}

impl Catalog {
    /// Parse raw file bytes into a catalog.
    ///
    /// The declared charset is sniffed from the header first (a lossy pass),
    /// then the whole byte stream is decoded under it before tokenizing.
    pub fn parse(path: &str, bytes: &[u8]) -> Result<Catalog, EncodingError> {
        let charset = sniff_charset(&String::from_utf8_lossy(bytes));
        let text = decode(bytes, &charset)?;

        let mut metadata = Metadata::default();
        let mut seen_header = false;
        let mut messages = Vec::new();

        for block in read_blocks(&text) {
            let Some(msg) = PoMessage::from_block(block) else {
                continue;
            };
            if msg.is_header() && !msg.obsolete && !seen_header {
                metadata = Metadata::parse(&msg.msgstr[0], msg.line);
                seen_header = true;
            } else {
                messages.push(msg);
            }
        }
        metadata.charset = charset;

        Ok(Catalog {
            path: path.to_string(),
            metadata,
            messages,
        })
    }
}

fn decode(bytes: &[u8], charset: &str) -> Result<String, EncodingError> {
    let normalized = charset.to_ascii_lowercase();
    match normalized.as_str() {
        "utf-8" | "utf8" | "us-ascii" | "ascii" => {
            std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|err| EncodingError {
                    charset: charset.to_string(),
                    detail: err.to_string(),
                })
        }
        // latin-1 maps bytes to the first 256 code points directly
        "iso-8859-1" | "iso8859-1" | "latin-1" | "latin1" => {
            Ok(bytes.iter().map(|&b| b as char).collect())
        }
        _ => Err(EncodingError {
            charset: charset.to_string(),
            detail: "unsupported charset".to_string(),
        }),
    }
}
