//! # Block Splitting
//!
//! Pre-segments a Markdown document into an ordered list of [`TypedBlock`]s:
//! runs of prose lines and pipe tables.
//!
//! A table starts on a pipe-containing line whose next line is a separator
//! row (`---|:---:|---`). It extends over every following non-blank line that
//! contains a pipe or is a separator. The blank line that ends a table belongs
//! to the table.
//!
//! ## Modules
//!
//! - **`types`**: `TypedBlock`
//! - **`table`**: Separator detection and row-to-cells parsing
//! - **`splitter`**: `split_blocks()` entry point

pub mod splitter;
pub mod table;
pub mod types;

pub use splitter::split_blocks;
pub use types::TypedBlock;
