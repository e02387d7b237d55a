/// Run-level style of a marked inline segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    BoldItalic,
    Bold,
    Italic,
    Code,
}

/// A piece of line text with its style, delimiters already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    /// `None` for literal text.
    pub style: Option<InlineStyle>,
}

impl StyledSpan {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: InlineStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// Result of parsing one line: the spans in order plus their total length
/// in document offset units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineLine {
    pub spans: Vec<StyledSpan>,
    pub len: usize,
}

impl InlineLine {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
