use super::{
    table::{PIPE, continues_table, is_separator, parse_row},
    types::TypedBlock,
};

/// Splits `markdown` into prose and table blocks in source order.
///
/// Prose lines are accumulated until a table header is found (a line holding
/// a pipe followed by a separator line), then flushed as a
/// [`TypedBlock::Text`]. The table consumes rows until the first blank line or
/// the first line without a pipe; a single terminating blank line is consumed
/// with it. Separator rows are dropped from the parsed rows.
pub fn split_blocks(markdown: &str) -> Vec<TypedBlock> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut text: Vec<String> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let opens_table = lines[i].contains(PIPE)
            && lines.get(i + 1).is_some_and(|next| is_separator(next));
        if !opens_table {
            text.push(lines[i].to_string());
            i += 1;
            continue;
        }

        if !text.is_empty() {
            blocks.push(TypedBlock::Text {
                lines: std::mem::take(&mut text),
            });
        }

        let mut rows = Vec::new();
        while i < lines.len() && continues_table(lines[i]) {
            if !is_separator(lines[i]) {
                rows.push(parse_row(lines[i]));
            }
            i += 1;
        }
        if lines.get(i).is_some_and(|l| l.trim().is_empty()) {
            i += 1;
        }

        log::debug!("Found table with {} rows", rows.len());
        blocks.push(TypedBlock::Table { rows });
    }

    if !text.is_empty() {
        blocks.push(TypedBlock::Text { lines: text });
    }
    blocks
}
