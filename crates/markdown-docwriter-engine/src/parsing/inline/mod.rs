//! # Inline Parsing
//!
//! Splits a single line into alternating literal and marked segments.
//!
//! ## Marker Precedence
//!
//! Longer markers are tried first so `***x***` is one bold+italic span rather
//! than a bold span wrapping stray asterisks:
//!
//! 1. `***text***` bold + italic
//! 2. `**text**` bold
//! 3. `*text*` italic
//! 4. `` `text` `` code
//!
//! Marked segments whose payload is empty after stripping delimiters produce
//! nothing.

pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{InlineLine, InlineStyle, StyledSpan};
