//! Delimiters owned by each inline style.

use super::types::InlineStyle;

impl InlineStyle {
    /// Opening/closing delimiter of the style.
    pub const fn delimiter(self) -> &'static str {
        match self {
            InlineStyle::BoldItalic => "***",
            InlineStyle::Bold => "**",
            InlineStyle::Italic => "*",
            InlineStyle::Code => "`",
        }
    }

    /// Styles in the order they must be tried.
    pub const PRECEDENCE: [InlineStyle; 4] = [
        InlineStyle::BoldItalic,
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Code,
    ];

    /// Returns the style whose delimiters wrap `segment`, if any.
    pub fn of_segment(segment: &str) -> Option<Self> {
        Self::PRECEDENCE.into_iter().find(|style| {
            let d = style.delimiter();
            segment.len() >= 2 * d.len() && segment.starts_with(d) && segment.ends_with(d)
        })
    }
}
