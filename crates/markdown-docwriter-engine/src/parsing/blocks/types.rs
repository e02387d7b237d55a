use serde::Serialize;

/// A maximal run of Markdown classified as prose or tabular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypedBlock {
    /// Prose lines, without their line terminators.
    Text { lines: Vec<String> },
    /// Table rows in source order, separator row excluded.
    ///
    /// Rows are not guaranteed to have equal widths.
    Table { rows: Vec<Vec<String>> },
}

impl TypedBlock {
    /// Prose text handed to the converter: the lines joined with `\n`.
    pub fn text(&self) -> Option<String> {
        match self {
            TypedBlock::Text { lines } => Some(lines.join("\n")),
            TypedBlock::Table { .. } => None,
        }
    }

    /// True when a text block holds nothing but whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, TypedBlock::Text { lines } if lines.iter().all(|l| l.trim().is_empty()))
    }

    /// Table geometry as `(rows, columns)`. Columns follow the header row.
    pub fn table_shape(&self) -> Option<(usize, usize)> {
        match self {
            TypedBlock::Table { rows } => {
                Some((rows.len(), rows.first().map(Vec::len).unwrap_or_default()))
            }
            TypedBlock::Text { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_lines() {
        let block = TypedBlock::Text {
            lines: vec!["# H".to_string(), String::new()],
        };
        assert_eq!(block.text().as_deref(), Some("# H\n"));
        assert!(!block.is_blank_text());
        assert_eq!(block.table_shape(), None);
    }

    #[test]
    fn whitespace_block_is_blank() {
        let block = TypedBlock::Text {
            lines: vec![String::new(), "  ".to_string()],
        };
        assert!(block.is_blank_text());
    }

    #[test]
    fn shape_uses_header_width() {
        let block = TypedBlock::Table {
            rows: vec![
                vec!["a".into(), "b".into(), "c".into()],
                vec!["1".into()],
            ],
        };
        assert_eq!(block.table_shape(), Some((2, 3)));
        assert_eq!(block.text(), None);
    }
}
