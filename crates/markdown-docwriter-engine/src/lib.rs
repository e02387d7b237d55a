//! Converts Markdown into positional edit operations for a rich-document
//! editing API addressed by absolute offsets.
//!
//! Raw Markdown is split into prose and table blocks. Prose is converted into
//! inserts and range styles anchored at a caller supplied offset; tables are
//! inserted, located again in a fresh snapshot and filled highest offset
//! first. A [`DocumentStore`] applies the operations.

pub mod document;
pub mod ops;
pub mod parsing;
pub mod store;
pub mod tables;
pub mod writer;

// Re-export key types for easier usage
pub use document::Document;
pub use ops::{BulletPreset, EditOperation, FontSpec, NamedStyle, TextStyle};
pub use parsing::{Converter, ConverterOptions, TypedBlock, convert, parse_inline, split_blocks};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use tables::{CellAnchor, PlanError, TablePlacement, locate_and_fill};
pub use writer::{
    DocumentInfo, MarkdownWriter, WriteError, WriteOutcome, WriteStatus, document_info,
    write_markdown,
};
