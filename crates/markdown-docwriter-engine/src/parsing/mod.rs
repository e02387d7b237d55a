//! # Markdown Parsing
//!
//! Line-oriented parsing of the Markdown subset the converter understands.
//!
//! ## Modules
//!
//! - **`blocks`**: Splits a document into ordered text and table blocks
//! - **`lines`**: Classifies single lines and converts text blocks into edit operations
//! - **`inline`**: Parses run-level markup (bold, italic, code) inside one line

pub mod blocks;
pub mod inline;
pub mod lines;

pub use blocks::{TypedBlock, split_blocks};
pub use inline::{InlineLine, InlineStyle, StyledSpan, parse_inline};
pub use lines::{Converter, ConverterOptions, LineClass, convert};
