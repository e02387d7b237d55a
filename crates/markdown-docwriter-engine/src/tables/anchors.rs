use crate::document::Table;

/// Offset at which a specific cell's content begins.
///
/// Valid only against the snapshot it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAnchor {
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

/// One anchor per cell that has a content run, in row-major order.
pub fn cell_anchors(table: &Table) -> Vec<CellAnchor> {
    table
        .table_rows
        .iter()
        .enumerate()
        .flat_map(|(row, r)| {
            r.table_cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| {
                    cell.content_start()
                        .map(|offset| CellAnchor { offset, row, col })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Paragraph, ParagraphElement, StructuralElement, TableCell, TableRow};

    fn cell(start: Option<usize>) -> TableCell {
        let content = match start {
            Some(i) => vec![StructuralElement {
                start_index: Some(i),
                end_index: i + 1,
                paragraph: Some(Paragraph {
                    elements: vec![ParagraphElement {
                        start_index: Some(i),
                        end_index: i + 1,
                        text_run: None,
                    }],
                    ..Paragraph::default()
                }),
                ..StructuralElement::default()
            }],
            None => vec![],
        };
        TableCell {
            content,
            ..TableCell::default()
        }
    }

    #[test]
    fn anchors_skip_cells_without_runs() {
        let table = Table {
            rows: 2,
            columns: 2,
            table_rows: vec![
                TableRow {
                    table_cells: vec![cell(Some(5)), cell(None)],
                    ..TableRow::default()
                },
                TableRow {
                    table_cells: vec![cell(Some(10)), cell(Some(12))],
                    ..TableRow::default()
                },
            ],
        };
        assert_eq!(
            cell_anchors(&table),
            vec![
                CellAnchor { offset: 5, row: 0, col: 0 },
                CellAnchor { offset: 10, row: 1, col: 0 },
                CellAnchor { offset: 12, row: 1, col: 1 },
            ]
        );
    }
}
