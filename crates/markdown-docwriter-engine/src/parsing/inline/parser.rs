use std::sync::OnceLock;

use regex::Regex;

use crate::ops::offset_len;

use super::types::{InlineLine, InlineStyle, StyledSpan};

/// Alternation of every inline marker, longest delimiter first.
fn marker_regex() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| {
        Regex::new(r"(\*\*\*.*?\*\*\*|\*\*.*?\*\*|\*.*?\*|`.*?`)").expect("Invalid inline marker regex")
    })
}

/// Parses a single line's inline markup into ordered [`StyledSpan`]s.
///
/// Text between markers becomes literal spans. Marked segments are stripped of
/// their delimiters; an empty payload is dropped. Unclosed markers stay literal.
///
/// # Returns
/// The spans plus their summed length in document offsets. Empty input yields
/// no spans and a length of zero.
pub fn parse_inline(text: &str) -> InlineLine {
    let mut line = InlineLine::default();
    let mut literal_start = 0;

    for m in marker_regex().find_iter(text) {
        push_literal(&mut line, &text[literal_start..m.start()]);
        literal_start = m.end();

        let segment = m.as_str();
        let Some(style) = InlineStyle::of_segment(segment) else {
            push_literal(&mut line, segment);
            continue;
        };
        let d = style.delimiter().len();
        let payload = &segment[d..segment.len() - d];
        if payload.is_empty() {
            continue;
        }
        line.len += offset_len(payload);
        line.spans.push(StyledSpan::styled(payload, style));
    }

    push_literal(&mut line, &text[literal_start..]);
    line
}

fn push_literal(line: &mut InlineLine, text: &str) {
    if text.is_empty() {
        return;
    }
    line.len += offset_len(text);
    line.spans.push(StyledSpan::literal(text));
}
