//! # Table Placement
//!
//! Locates a freshly inserted table inside a document snapshot and plans the
//! inserts that fill its cells.
//!
//! ## Ordering
//!
//! Inserting text shifts every later offset. Fills are therefore emitted in
//! strictly descending anchor order: each insert lands before every insert
//! already planned, so all anchors stay valid against the original snapshot.
//!
//! ## Modules
//!
//! - **`anchors`**: `CellAnchor` discovery from a table element
//! - **`planner`**: Table lookup (`TablePlacement`) and fill ordering

pub mod anchors;
pub mod planner;

pub use anchors::{CellAnchor, cell_anchors};
pub use planner::{PlanError, TablePlacement, fill_operations, locate_and_fill, locate_table};
