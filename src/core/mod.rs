//! Core PO parsing engine.
//!
//! Three stages, leaves first: the record reader groups raw lines into
//! blocks, the message model builder turns blocks into [`PoMessage`]
//! entities, and the header parser extracts catalog [`Metadata`] from the
//! distinguished empty-id entry. [`Catalog::parse`] ties them together,
//! including charset handling.

pub mod catalog;
pub mod header;
pub mod message;
pub mod reader;

pub use catalog::{Catalog, EncodingError};
pub use header::Metadata;
pub use message::PoMessage;
pub use reader::{RawBlock, RecordReader};
