//! # Document Snapshots
//!
//! Read-only structural view of a remote document, deserialized from the
//! store's JSON representation. Offsets in a snapshot are valid only for the
//! document state it was read from.

use serde::{Deserialize, Serialize};

/// A document as returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub document_id: String,
    pub title: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    pub content: Vec<StructuralElement>,
}

/// A top-level or cell-level element: paragraph, table or section break.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralElement {
    /// Absent on the leading section break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    pub end_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_break: Option<SectionBreak>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionBreak {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub elements: Vec<ParagraphElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_style: Option<ParagraphStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    pub named_style_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bullet {
    pub list_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    pub end_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRun {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub rows: usize,
    pub columns: usize,
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    pub start_index: usize,
    pub end_index: usize,
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub start_index: usize,
    pub end_index: usize,
    pub content: Vec<StructuralElement>,
}

impl Document {
    /// Offset just before the body's implicit trailing terminator: the
    /// largest element end offset (taken as at least 1) minus one.
    pub fn end_offset(&self) -> usize {
        let max_end = self
            .body
            .content
            .iter()
            .map(|el| el.end_index)
            .max()
            .unwrap_or(1)
            .max(1);
        max_end - 1
    }

    /// Top-level table elements in document order.
    pub fn tables(&self) -> impl Iterator<Item = &StructuralElement> {
        self.body.content.iter().filter(|el| el.table.is_some())
    }

    /// Flattened text of every paragraph, including table cells.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.body.content, &mut out);
        out
    }
}

fn collect_text(content: &[StructuralElement], out: &mut String) {
    for el in content {
        if let Some(paragraph) = &el.paragraph {
            for run in paragraph.elements.iter().filter_map(|e| e.text_run.as_ref()) {
                out.push_str(&run.content);
            }
        }
        if let Some(table) = &el.table {
            for cell in table.table_rows.iter().flat_map(|r| &r.table_cells) {
                collect_text(&cell.content, out);
            }
        }
    }
}

impl TableCell {
    /// Start offset of the first content run of the cell's first paragraph.
    pub fn content_start(&self) -> Option<usize> {
        self.content
            .first()?
            .paragraph
            .as_ref()?
            .elements
            .first()?
            .start_index
    }
}
