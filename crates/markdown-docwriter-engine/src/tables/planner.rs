use thiserror::Error;

use crate::document::{Document, StructuralElement};
use crate::ops::EditOperation;

use super::anchors::{CellAnchor, cell_anchors};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("No table found in the document to fill")]
    NoTable,
}

/// How to pick the target table out of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePlacement {
    /// The table starting within one offset of the given anchor (the insert
    /// itself takes one slot for the paragraph break), falling back to the
    /// last table in the document when none is that close.
    NearAnchor(usize),
    /// The first table in the document.
    First,
}

/// Finds the table element selected by `placement`.
pub fn locate_table(snapshot: &Document, placement: TablePlacement) -> Option<&StructuralElement> {
    match placement {
        TablePlacement::First => snapshot.tables().next(),
        TablePlacement::NearAnchor(anchor) => snapshot
            .tables()
            .find(|el| el.start_index.is_some_and(|start| start.abs_diff(anchor) <= 1))
            .or_else(|| {
                let last = snapshot.tables().last();
                if last.is_some() {
                    log::debug!("No table within 1 of offset {anchor}, using the last table");
                }
                last
            }),
    }
}

/// Orders fills for `anchors` highest offset first.
///
/// Anchors outside `data`, or whose cell text is empty, produce no insert.
/// Ragged data rows are clamped to the cells that exist on both sides.
pub fn fill_operations(mut anchors: Vec<CellAnchor>, data: &[Vec<String>]) -> Vec<EditOperation> {
    anchors.sort_by(|a, b| b.offset.cmp(&a.offset));
    anchors
        .into_iter()
        .filter_map(|anchor| {
            let text = data.get(anchor.row)?.get(anchor.col)?;
            if text.is_empty() {
                return None;
            }
            Some(EditOperation::InsertText {
                index: anchor.offset,
                text: text.clone(),
            })
        })
        .collect()
}

/// Locates the target table in `snapshot` and plans the fills of its cells
/// from `data`.
///
/// # Errors
/// [`PlanError::NoTable`] when the snapshot holds no table at all.
pub fn locate_and_fill(
    snapshot: &Document,
    data: &[Vec<String>],
    placement: TablePlacement,
) -> Result<Vec<EditOperation>, PlanError> {
    let table = locate_table(snapshot, placement)
        .and_then(|el| el.table.as_ref())
        .ok_or(PlanError::NoTable)?;
    let anchors = cell_anchors(table);
    if anchors.is_empty() {
        log::warn!("Table has no cell positions to fill");
    }
    Ok(fill_operations(anchors, data))
}
