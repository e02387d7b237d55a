//! # Edit Operations
//!
//! The positional edit vocabulary of the target rich-document API.
//!
//! Every operation addresses the document by absolute offsets. Ranges are
//! half-open `[start, end)`. Operations are produced fresh per conversion call
//! and handed to a [`DocumentStore`](crate::store::DocumentStore) exactly once.
//!
//! ## Modules
//!
//! - **`wire`**: Encoding of operations into the remote batch-update request shape

pub mod wire;

pub use wire::{BatchUpdateRequest, Request};

/// Length of `text` in document offset units.
///
/// The target API counts UTF-16 code units, so characters outside the Basic
/// Multilingual Plane occupy two offsets.
pub fn offset_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Named paragraph style applied to headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedStyle {
    Heading1,
    Heading2,
    Heading3,
    Heading4,
}

impl NamedStyle {
    /// Maps a Markdown heading level (number of `#`) to a style.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading1 => "HEADING_1",
            Self::Heading2 => "HEADING_2",
            Self::Heading3 => "HEADING_3",
            Self::Heading4 => "HEADING_4",
        }
    }
}

/// Glyph preset used when turning paragraphs into list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletPreset {
    /// Unordered lists: disc, circle, square by nesting level.
    DiscCircleSquare,
    /// Ordered lists: decimal, alpha, roman by nesting level.
    DecimalAlphaRoman,
}

impl BulletPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiscCircleSquare => "BULLET_DISC_CIRCLE_SQUARE",
            Self::DecimalAlphaRoman => "NUMBERED_DECIMAL_ALPHA_ROMAN",
        }
    }
}

/// A font family with a fixed point size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size_pt: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Courier New".to_string(),
            size_pt: 10,
        }
    }
}

/// Run-level style flags. Only the flags that are set are sent to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub font: Option<FontSpec>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn bold_italic() -> Self {
        Self {
            bold: true,
            italic: true,
            font: None,
        }
    }

    pub fn monospace(font: FontSpec) -> Self {
        Self {
            font: Some(font),
            ..Self::default()
        }
    }

    /// Comma separated field mask naming exactly the attributes this style sets.
    pub fn fields(&self) -> String {
        let mut fields = Vec::new();
        if self.bold {
            fields.push("bold");
        }
        if self.italic {
            fields.push("italic");
        }
        if self.font.is_some() {
            fields.push("weightedFontFamily");
            fields.push("fontSize");
        }
        fields.join(",")
    }
}

/// A single positional edit against the remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Insert `text` so that its first character lands at `index`.
    InsertText { index: usize, text: String },
    /// Apply a named paragraph style to every paragraph overlapping the range.
    SetParagraphStyle {
        start_index: usize,
        end_index: usize,
        style: NamedStyle,
    },
    /// Apply run-level styling to the range.
    SetTextStyle {
        start_index: usize,
        end_index: usize,
        style: TextStyle,
    },
    /// Turn every paragraph overlapping the range into a list item.
    CreateBullets {
        start_index: usize,
        end_index: usize,
        preset: BulletPreset,
    },
    /// Insert an empty `rows` x `cols` table at `index`.
    InsertTable {
        rows: usize,
        cols: usize,
        index: usize,
    },
}

impl EditOperation {
    /// Number of offsets this operation adds to the document.
    ///
    /// Only text insertion is counted; styling never moves offsets and table
    /// geometry is read back from a snapshot.
    pub fn inserted_len(&self) -> usize {
        match self {
            Self::InsertText { text, .. } => offset_len(text),
            _ => 0,
        }
    }

    /// True for an `InsertText` carrying no text, which the remote API rejects.
    pub fn is_empty_insert(&self) -> bool {
        matches!(self, Self::InsertText { text, .. } if text.is_empty())
    }
}
