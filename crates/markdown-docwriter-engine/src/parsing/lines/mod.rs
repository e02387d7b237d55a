//! # Line Conversion
//!
//! Converts a prose block into positional edit operations, one line at a time.
//!
//! ## Phases
//!
//! 1. **Classification** (`classify`): each line is matched against an ordered
//!    list of prefixes (heading, bullet item, numbered item) with paragraph as
//!    the fallback. First match wins; no line looks at its neighbours.
//! 2. **Conversion** (`convert`): a [`Converter`] walks the classified lines
//!    with a running cursor, emitting inserts followed by the style operation
//!    covering exactly the inserted range.
//!
//! ## Key Invariants
//!
//! - The cursor advances by exactly the length of each inserted text and never
//!   for style, bullet or paragraph-style operations.
//! - No `InsertText` with empty text is ever produced.

pub mod classify;
pub mod convert;

pub use classify::{LineClass, MarkdownLineClassifier};
pub use convert::{Converter, ConverterOptions, convert};
