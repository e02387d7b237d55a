use crate::ops::{BulletPreset, EditOperation, FontSpec, NamedStyle, TextStyle, offset_len};
use crate::parsing::inline::{InlineStyle, parse_inline};

use super::classify::{LineClass, MarkdownLineClassifier};

/// Knobs for the styles the converter emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Font applied to inline code spans.
    pub code_font: FontSpec,
}

/// Converts prose Markdown into edit operations anchored at a start offset.
///
/// The cursor is owned by one converter and reset on every
/// [`convert`](Converter::convert) call; the caller seeds it with the
/// document's current end offset.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConverterOptions,
    classifier: MarkdownLineClassifier,
    cursor: usize,
    ops: Vec<EditOperation>,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Next free insertion offset after the last conversion.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Converts `markdown` line by line, starting insertion at `start_index`.
    pub fn convert(&mut self, markdown: &str, start_index: usize) -> Vec<EditOperation> {
        self.cursor = start_index;
        self.ops.clear();

        for raw in markdown.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            match self.classifier.classify(line) {
                LineClass::Empty => {}
                LineClass::Blank => {
                    self.insert_text("\n");
                }
                LineClass::Heading { level, text } => self.heading(level, text),
                LineClass::Bullet { text } => self.list_item(text, BulletPreset::DiscCircleSquare),
                LineClass::Numbered { text } => {
                    self.list_item(text, BulletPreset::DecimalAlphaRoman)
                }
                LineClass::Paragraph { text } => {
                    if self.inline(text) > 0 {
                        self.insert_text("\n");
                    }
                }
            }
        }

        log::debug!(
            "Converted markdown into {} operations ending at offset {}",
            self.ops.len(),
            self.cursor
        );
        std::mem::take(&mut self.ops)
    }

    /// Emits an insert at the cursor and advances it. Empty text emits nothing.
    fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            log::debug!("Skipping empty insert at offset {}", self.cursor);
            return false;
        }
        self.ops.push(EditOperation::InsertText {
            index: self.cursor,
            text: text.to_string(),
        });
        self.cursor += offset_len(text);
        true
    }

    fn heading(&mut self, level: u8, text: &str) {
        let Some(style) = NamedStyle::heading(level) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let start = self.cursor;
        self.insert_text(&format!("{text}\n"));
        // Trailing newline stays outside the styled range.
        self.ops.push(EditOperation::SetParagraphStyle {
            start_index: start,
            end_index: self.cursor - 1,
            style,
        });
    }

    fn list_item(&mut self, text: &str, preset: BulletPreset) {
        let start = self.cursor;
        if self.inline(text) == 0 {
            return;
        }
        self.insert_text("\n");
        self.ops.push(EditOperation::CreateBullets {
            start_index: start,
            end_index: self.cursor - 1,
            preset,
        });
    }

    /// Emits the inline spans of `text`, each marked span followed by its
    /// style over exactly the inserted range. Returns the inserted length.
    fn inline(&mut self, text: &str) -> usize {
        let line = parse_inline(text);
        for span in line.spans {
            let start = self.cursor;
            if !self.insert_text(&span.text) {
                continue;
            }
            if let Some(style) = span.style {
                self.ops.push(EditOperation::SetTextStyle {
                    start_index: start,
                    end_index: self.cursor,
                    style: self.text_style(style),
                });
            }
        }
        line.len
    }

    fn text_style(&self, style: InlineStyle) -> TextStyle {
        match style {
            InlineStyle::BoldItalic => TextStyle::bold_italic(),
            InlineStyle::Bold => TextStyle::bold(),
            InlineStyle::Italic => TextStyle::italic(),
            InlineStyle::Code => TextStyle::monospace(self.options.code_font.clone()),
        }
    }
}

/// Converts `markdown` with default options. See [`Converter::convert`].
pub fn convert(markdown: &str, start_index: usize) -> Vec<EditOperation> {
    Converter::default().convert(markdown, start_index)
}
