use std::collections::{HashMap, HashSet};

use crate::document::{
    Body, Bullet, Document, Paragraph, ParagraphElement, ParagraphStyle, SectionBreak,
    StructuralElement, Table, TableCell, TableRow, TextRun,
};
use crate::ops::{BulletPreset, EditOperation, NamedStyle, TextStyle};

use super::{DocumentStore, StoreError};

const NEWLINE: u16 = b'\n' as u16;

/// What occupies one offset of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    SectionBreak,
    /// One UTF-16 code unit of paragraph text.
    Text(u16),
    TableStart,
    RowStart,
    CellStart,
    TableEnd,
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    unit: Unit,
    style: TextStyle,
    /// Paragraph attributes live on the paragraph's terminating newline.
    named: Option<NamedStyle>,
    bullet: Option<BulletPreset>,
}

impl Slot {
    fn new(unit: Unit) -> Self {
        Self {
            unit,
            style: TextStyle::default(),
            named: None,
            bullet: None,
        }
    }

    fn text(&self) -> Option<u16> {
        match self.unit {
            Unit::Text(u) => Some(u),
            _ => None,
        }
    }
}

/// A single document laid out on the remote offset model.
///
/// Offset 0 is a section break, every paragraph ends with `\n` and the body
/// always ends with a terminating paragraph. A table takes one offset for its
/// start, one per row, one per cell and one for its end; each cell holds one
/// paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    title: String,
    slots: Vec<Slot>,
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        let mut doc = Self {
            title: title.into(),
            slots: Vec::new(),
        };
        doc.clear();
        doc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resets to the empty body: a section break and one empty paragraph.
    pub fn clear(&mut self) {
        self.slots = vec![Slot::new(Unit::SectionBreak), Slot::new(Unit::Text(NEWLINE))];
    }

    pub fn end_offset(&self) -> usize {
        self.slots.len() - 1
    }

    /// Every paragraph's text in offset order, table cells included.
    pub fn plain_text(&self) -> String {
        let units: Vec<u16> = self.slots.iter().filter_map(Slot::text).collect();
        String::from_utf16_lossy(&units)
    }

    /// Applies a batch atomically: either every operation applies or none.
    pub fn apply_all(&mut self, operations: &[EditOperation]) -> Result<(), String> {
        let mut next = self.clone();
        for (i, op) in operations.iter().enumerate() {
            next.apply(op).map_err(|e| format!("requests[{i}]: {e}"))?;
        }
        *self = next;
        Ok(())
    }

    fn apply(&mut self, op: &EditOperation) -> Result<(), String> {
        match op {
            EditOperation::InsertText { index, text } => {
                if text.is_empty() {
                    return Err("insertText requires non-empty text".to_string());
                }
                self.check_insertion_point(*index)?;
                let slots = text.encode_utf16().map(|u| Slot::new(Unit::Text(u)));
                self.slots.splice(*index..*index, slots);
                Ok(())
            }
            EditOperation::SetParagraphStyle {
                start_index,
                end_index,
                style,
            } => {
                for nl in self.paragraph_ends(*start_index, *end_index)? {
                    self.slots[nl].named = Some(*style);
                }
                Ok(())
            }
            EditOperation::CreateBullets {
                start_index,
                end_index,
                preset,
            } => {
                for nl in self.paragraph_ends(*start_index, *end_index)? {
                    self.slots[nl].bullet = Some(*preset);
                }
                Ok(())
            }
            EditOperation::SetTextStyle {
                start_index,
                end_index,
                style,
            } => {
                self.check_range(*start_index, *end_index)?;
                for slot in &mut self.slots[*start_index..*end_index] {
                    if slot.text().is_some() {
                        slot.style.bold |= style.bold;
                        slot.style.italic |= style.italic;
                        if style.font.is_some() {
                            slot.style.font.clone_from(&style.font);
                        }
                    }
                }
                Ok(())
            }
            EditOperation::InsertTable { rows, cols, index } => {
                if *rows == 0 || *cols == 0 {
                    return Err(format!("insertTable needs at least one cell, got {rows}x{cols}"));
                }
                self.check_insertion_point(*index)?;
                let mut table = vec![Slot::new(Unit::Text(NEWLINE)), Slot::new(Unit::TableStart)];
                for _ in 0..*rows {
                    table.push(Slot::new(Unit::RowStart));
                    for _ in 0..*cols {
                        table.push(Slot::new(Unit::CellStart));
                        table.push(Slot::new(Unit::Text(NEWLINE)));
                    }
                }
                table.push(Slot::new(Unit::TableEnd));
                self.slots.splice(*index..*index, table);
                Ok(())
            }
        }
    }

    /// Text may only be inserted before a unit of paragraph text.
    fn check_insertion_point(&self, index: usize) -> Result<(), String> {
        match self.slots.get(index) {
            Some(slot) if index >= 1 && slot.text().is_some() => Ok(()),
            _ => Err(format!("index {index} is not inside a paragraph")),
        }
    }

    /// Style ranges must be non-empty and end before the final terminator.
    fn check_range(&self, start: usize, end: usize) -> Result<(), String> {
        if start < 1 || start >= end || end > self.end_offset() {
            return Err(format!(
                "invalid range [{start}, {end}) for document ending at {}",
                self.end_offset()
            ));
        }
        Ok(())
    }

    /// Offsets of the newlines terminating every paragraph overlapping the range.
    fn paragraph_ends(&self, start: usize, end: usize) -> Result<Vec<usize>, String> {
        self.check_range(start, end)?;
        let mut ends = Vec::new();
        let mut i = start;
        while i < end {
            let mut j = i;
            loop {
                match self.slots.get(j).and_then(Slot::text) {
                    Some(NEWLINE) => break,
                    Some(_) => j += 1,
                    None => return Err(format!("range [{start}, {end}) crosses a table")),
                }
            }
            ends.push(j);
            i = j + 1;
        }
        Ok(ends)
    }

    /// Builds the structural snapshot the remote store would return.
    pub fn snapshot(&self, document_id: &str) -> Document {
        let mut content = Vec::new();
        let mut i = 0;
        while i < self.slots.len() {
            match self.slots[i].unit {
                Unit::SectionBreak => {
                    content.push(StructuralElement {
                        end_index: i + 1,
                        section_break: Some(SectionBreak {}),
                        ..StructuralElement::default()
                    });
                    i += 1;
                }
                Unit::Text(_) => {
                    let (el, next) = self.paragraph_at(i);
                    content.push(el);
                    i = next;
                }
                Unit::TableStart => {
                    let (el, next) = self.table_at(i);
                    content.push(el);
                    i = next;
                }
                Unit::RowStart | Unit::CellStart | Unit::TableEnd => i += 1,
            }
        }
        Document {
            document_id: document_id.to_string(),
            title: Some(self.title.clone()),
            body: Body { content },
        }
    }

    fn paragraph_at(&self, start: usize) -> (StructuralElement, usize) {
        let mut end = start;
        while let Some(u) = self.slots.get(end).and_then(Slot::text) {
            end += 1;
            if u == NEWLINE {
                break;
            }
        }

        let mut elements = Vec::new();
        let mut run_start = start;
        for i in start..end {
            let run_ends = i + 1 == end || self.slots[i + 1].style != self.slots[run_start].style;
            if run_ends {
                let units: Vec<u16> = self.slots[run_start..=i]
                    .iter()
                    .filter_map(Slot::text)
                    .collect();
                elements.push(ParagraphElement {
                    start_index: Some(run_start),
                    end_index: i + 1,
                    text_run: Some(TextRun {
                        content: String::from_utf16_lossy(&units),
                    }),
                });
                run_start = i + 1;
            }
        }

        let terminator = &self.slots[end - 1];
        let paragraph = Paragraph {
            elements,
            paragraph_style: Some(ParagraphStyle {
                named_style_type: terminator
                    .named
                    .map_or("NORMAL_TEXT", NamedStyle::as_str)
                    .to_string(),
            }),
            bullet: terminator.bullet.map(|preset| Bullet {
                list_id: preset.as_str().to_string(),
            }),
        };
        let el = StructuralElement {
            start_index: Some(start),
            end_index: end,
            paragraph: Some(paragraph),
            ..StructuralElement::default()
        };
        (el, end)
    }

    fn table_at(&self, start: usize) -> (StructuralElement, usize) {
        let unit_at = |i: usize| self.slots.get(i).map(|s| s.unit);
        let mut i = start + 1;
        let mut table_rows = Vec::new();

        while unit_at(i) == Some(Unit::RowStart) {
            let row_start = i;
            i += 1;
            let mut table_cells = Vec::new();
            while unit_at(i) == Some(Unit::CellStart) {
                let cell_start = i;
                i += 1;
                let mut content = Vec::new();
                while matches!(unit_at(i), Some(Unit::Text(_))) {
                    let (el, next) = self.paragraph_at(i);
                    content.push(el);
                    i = next;
                }
                table_cells.push(TableCell {
                    start_index: cell_start,
                    end_index: i,
                    content,
                });
            }
            table_rows.push(TableRow {
                start_index: row_start,
                end_index: i,
                table_cells,
            });
        }
        if unit_at(i) == Some(Unit::TableEnd) {
            i += 1;
        }

        let columns = table_rows.first().map_or(0, |r| r.table_cells.len());
        let el = StructuralElement {
            start_index: Some(start),
            end_index: i,
            table: Some(Table {
                rows: table_rows.len(),
                columns,
                table_rows,
            }),
            ..StructuralElement::default()
        };
        (el, i)
    }
}

/// One call received by a [`MemoryStore`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Snapshot { document_id: String },
    EndOffset { document_id: String },
    ClearAll { document_id: String },
    Apply { document_id: String, operations: usize },
    InsertTable {
        document_id: String,
        rows: usize,
        cols: usize,
        index: usize,
    },
}

/// In-process [`DocumentStore`] holding [`MemoryDocument`]s by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, MemoryDocument>,
    read_only: HashSet<String>,
    reject_apply_call: Option<usize>,
    apply_calls: usize,
    journal: Vec<StoreCall>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty document under `document_id`.
    pub fn create_document(&mut self, document_id: &str, title: &str) -> &mut MemoryDocument {
        self.documents
            .entry(document_id.to_string())
            .or_insert_with(|| MemoryDocument::new(title))
    }

    /// Makes every mutation of `document_id` fail with `PermissionDenied`.
    pub fn set_read_only(&mut self, document_id: &str) {
        self.read_only.insert(document_id.to_string());
    }

    /// Rejects the `n`th `apply_operations` call (0-based) with `Rejected`.
    pub fn reject_apply_call(&mut self, n: usize) {
        self.reject_apply_call = Some(n);
    }

    pub fn document(&self, document_id: &str) -> Option<&MemoryDocument> {
        self.documents.get(document_id)
    }

    pub fn journal(&self) -> &[StoreCall] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn read(&self, document_id: &str) -> Result<&MemoryDocument, StoreError> {
        self.documents
            .get(document_id)
            .ok_or_else(|| StoreError::NotFound {
                document_id: document_id.to_string(),
            })
    }

    fn write(&mut self, document_id: &str) -> Result<&mut MemoryDocument, StoreError> {
        if self.read_only.contains(document_id) {
            return Err(StoreError::PermissionDenied {
                document_id: document_id.to_string(),
            });
        }
        self.documents
            .get_mut(document_id)
            .ok_or_else(|| StoreError::NotFound {
                document_id: document_id.to_string(),
            })
    }
}

impl DocumentStore for MemoryStore {
    fn snapshot(&mut self, document_id: &str) -> Result<Document, StoreError> {
        self.journal.push(StoreCall::Snapshot {
            document_id: document_id.to_string(),
        });
        Ok(self.read(document_id)?.snapshot(document_id))
    }

    fn end_offset(&mut self, document_id: &str) -> Result<usize, StoreError> {
        self.journal.push(StoreCall::EndOffset {
            document_id: document_id.to_string(),
        });
        Ok(self.read(document_id)?.end_offset())
    }

    fn clear_all(&mut self, document_id: &str) -> Result<(), StoreError> {
        self.journal.push(StoreCall::ClearAll {
            document_id: document_id.to_string(),
        });
        self.write(document_id)?.clear();
        Ok(())
    }

    fn apply_operations(
        &mut self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), StoreError> {
        self.journal.push(StoreCall::Apply {
            document_id: document_id.to_string(),
            operations: operations.len(),
        });
        let call = self.apply_calls;
        self.apply_calls += 1;
        let reject = self.reject_apply_call == Some(call);

        let doc = self.write(document_id)?;
        if reject {
            return Err(StoreError::Rejected {
                reason: format!("batch {call} rejected by the store"),
            });
        }
        doc.apply_all(operations)
            .map_err(|reason| StoreError::Rejected { reason })
    }

    fn insert_table(
        &mut self,
        document_id: &str,
        rows: usize,
        cols: usize,
        index: usize,
    ) -> Result<(), StoreError> {
        self.journal.push(StoreCall::InsertTable {
            document_id: document_id.to_string(),
            rows,
            cols,
            index,
        });
        self.write(document_id)?
            .apply_all(&[EditOperation::InsertTable { rows, cols, index }])
            .map_err(|reason| StoreError::Rejected { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert(index: usize, text: &str) -> EditOperation {
        EditOperation::InsertText {
            index,
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_document_layout() {
        let doc = MemoryDocument::new("t");
        assert_eq!(doc.end_offset(), 1);
        assert_eq!(doc.plain_text(), "\n");
        let snap = doc.snapshot("id");
        assert_eq!(snap.end_offset(), 1);
        assert_eq!(snap.body.content.len(), 2);
    }

    #[test]
    fn inserts_shift_the_end() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[insert(1, "Title\n")]).unwrap();
        assert_eq!(doc.end_offset(), 7);
        assert_eq!(doc.plain_text(), "Title\n\n");
    }

    #[test]
    fn heading_style_lands_on_paragraph() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[
            insert(1, "Title\n"),
            EditOperation::SetParagraphStyle {
                start_index: 1,
                end_index: 6,
                style: NamedStyle::Heading1,
            },
        ])
        .unwrap();
        let snap = doc.snapshot("id");
        let para = snap.body.content[1].paragraph.as_ref().unwrap();
        assert_eq!(
            para.paragraph_style.as_ref().unwrap().named_style_type,
            "HEADING_1"
        );
        let tail = snap.body.content[2].paragraph.as_ref().unwrap();
        assert_eq!(
            tail.paragraph_style.as_ref().unwrap().named_style_type,
            "NORMAL_TEXT"
        );
    }

    #[test]
    fn text_style_splits_runs() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[
            insert(1, "ab\n"),
            EditOperation::SetTextStyle {
                start_index: 2,
                end_index: 3,
                style: TextStyle::bold(),
            },
        ])
        .unwrap();
        let snap = doc.snapshot("id");
        let runs = &snap.body.content[1].paragraph.as_ref().unwrap().elements;
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].start_index, Some(2));
        assert_eq!(runs[1].text_run.as_ref().unwrap().content, "b");
    }

    #[test]
    fn batches_are_atomic() {
        let mut doc = MemoryDocument::new("t");
        let err = doc
            .apply_all(&[insert(1, "kept?\n"), insert(1, "")])
            .unwrap_err();
        assert!(err.contains("requests[1]"), "{err}");
        assert_eq!(doc.plain_text(), "\n");
    }

    #[test]
    fn out_of_range_operations_are_rejected() {
        let mut doc = MemoryDocument::new("t");
        assert!(doc.apply_all(&[insert(0, "x")]).is_err());
        assert!(doc.apply_all(&[insert(5, "x")]).is_err());
        assert!(
            doc.apply_all(&[EditOperation::SetTextStyle {
                start_index: 1,
                end_index: 1,
                style: TextStyle::bold(),
            }])
            .is_err()
        );
    }

    #[test]
    fn table_layout_matches_remote_offsets() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[EditOperation::InsertTable {
            rows: 2,
            cols: 2,
            index: 1,
        }])
        .unwrap();
        let snap = doc.snapshot("id");
        let table_el = snap.tables().next().unwrap();
        assert_eq!(table_el.start_index, Some(2));
        let table = table_el.table.as_ref().unwrap();
        assert_eq!((table.rows, table.columns), (2, 2));
        let starts: Vec<_> = table
            .table_rows
            .iter()
            .flat_map(|r| r.table_cells.iter().map(|c| c.content_start().unwrap()))
            .collect();
        assert_eq!(starts, vec![5, 7, 10, 12]);
        assert_eq!(table_el.end_index, 14);
        assert_eq!(snap.end_offset(), 14);
    }

    #[test]
    fn cannot_insert_inside_table_structure() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[EditOperation::InsertTable {
            rows: 1,
            cols: 1,
            index: 1,
        }])
        .unwrap();
        assert!(doc.apply_all(&[insert(2, "x")]).is_err());
        assert!(doc.apply_all(&[insert(4, "x")]).is_err());
        assert!(doc.apply_all(&[insert(5, "x")]).is_ok());
        assert_eq!(doc.plain_text(), "\nx\n\n");
    }

    #[test]
    fn store_reports_missing_and_read_only_documents() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.snapshot("nope"),
            Err(StoreError::NotFound {
                document_id: "nope".to_string()
            })
        );
        store.create_document("doc", "Doc");
        store.set_read_only("doc");
        assert!(store.snapshot("doc").is_ok());
        assert_eq!(
            store.clear_all("doc"),
            Err(StoreError::PermissionDenied {
                document_id: "doc".to_string()
            })
        );
    }

    #[test]
    fn journal_records_calls_in_order() {
        let mut store = MemoryStore::new();
        store.create_document("doc", "Doc");
        store.clear_all("doc").unwrap();
        store.apply_operations("doc", &[insert(1, "x")]).unwrap();
        store.insert_table("doc", 1, 2, 2).unwrap();
        assert_eq!(
            store.journal(),
            &[
                StoreCall::ClearAll {
                    document_id: "doc".to_string()
                },
                StoreCall::Apply {
                    document_id: "doc".to_string(),
                    operations: 1
                },
                StoreCall::InsertTable {
                    document_id: "doc".to_string(),
                    rows: 1,
                    cols: 2,
                    index: 2
                },
            ]
        );
    }

    #[test]
    fn cleared_journal_only_holds_later_calls() {
        let mut store = MemoryStore::new();
        store.create_document("doc", "Doc");
        store.clear_all("doc").unwrap();
        store.clear_journal();
        assert!(store.journal().is_empty());
        store.end_offset("doc").unwrap();
        assert_eq!(
            store.journal(),
            &[StoreCall::EndOffset {
                document_id: "doc".to_string()
            }]
        );
    }

    #[test]
    fn created_document_keeps_its_title() {
        let mut store = MemoryStore::new();
        store.create_document("doc", "Quarterly Report");
        assert_eq!(store.document("doc").unwrap().title(), "Quarterly Report");
    }

    #[test]
    fn bullets_reach_paragraph_when_range_excludes_newline() {
        let mut doc = MemoryDocument::new("t");
        doc.apply_all(&[
            insert(1, "a\n"),
            EditOperation::CreateBullets {
                start_index: 1,
                end_index: 2,
                preset: BulletPreset::DiscCircleSquare,
            },
        ])
        .unwrap();
        let snap = doc.snapshot("id");
        let para = snap.body.content[1].paragraph.as_ref().unwrap();
        assert_eq!(
            para.bullet.as_ref().map(|b| b.list_id.as_str()),
            Some(BulletPreset::DiscCircleSquare.as_str())
        );
        assert!(snap.body.content[2].paragraph.as_ref().unwrap().bullet.is_none());
    }

    #[test]
    fn injected_rejection_leaves_document_untouched() {
        let mut store = MemoryStore::new();
        store.create_document("doc", "Doc");
        store.reject_apply_call(0);
        assert!(matches!(
            store.apply_operations("doc", &[insert(1, "x")]),
            Err(StoreError::Rejected { .. })
        ));
        assert_eq!(store.document("doc").unwrap().plain_text(), "\n");
        store.apply_operations("doc", &[insert(1, "x")]).unwrap();
        assert_eq!(store.document("doc").unwrap().plain_text(), "x\n");
    }

    #[test]
    fn default_url_formatting() {
        let store = MemoryStore::new();
        assert_eq!(
            store.document_url("abc"),
            "https://docs.google.com/document/d/abc/edit"
        );
    }
}
