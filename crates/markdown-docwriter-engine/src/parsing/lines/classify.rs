use std::sync::OnceLock;

use regex::Regex;

/// What a single Markdown line is, with its prefix already stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// The literal empty string.
    Empty,
    /// Whitespace only.
    Blank,
    /// `#` to `####` followed by a space.
    Heading { level: u8, text: &'a str },
    /// `- ` or `* ` item.
    Bullet { text: &'a str },
    /// `N. ` item.
    Numbered { text: &'a str },
    /// Anything else.
    Paragraph { text: &'a str },
}

/// Highest heading level that maps to a document style.
const MAX_HEADING_LEVEL: u8 = 4;

const BULLET_PREFIXES: [&str; 2] = ["- ", "* "];

fn numbered_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^\d+\. (.*)$").expect("Invalid numbered item regex"))
}

/// Classifies individual lines. Each line is classified independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if line.is_empty() {
            return LineClass::Empty;
        }
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if let Some((level, text)) = Self::heading(line) {
            return LineClass::Heading { level, text };
        }
        if let Some(text) = BULLET_PREFIXES.iter().find_map(|p| line.strip_prefix(p)) {
            return LineClass::Bullet { text };
        }
        if let Some(caps) = numbered_regex().captures(line)
            && let Some(text) = caps.get(1)
        {
            return LineClass::Numbered {
                text: text.as_str(),
            };
        }
        LineClass::Paragraph { text: line }
    }

    fn heading(line: &str) -> Option<(u8, &str)> {
        let hashes = line.bytes().take_while(|&b| b == b'#').count();
        if hashes == 0 || hashes > usize::from(MAX_HEADING_LEVEL) {
            return None;
        }
        let text = line[hashes..].strip_prefix(' ')?;
        // Bounded by MAX_HEADING_LEVEL above.
        Some((hashes as u8, text))
    }
}
