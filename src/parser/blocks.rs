use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
// `**Key:** Value` and the `**Key**: Value` variant some authors write.
static META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*:]+?)(?::\*\*|\*\*:)\s*(.*)$").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*+]\s+(.+)$").unwrap());

/// One classified report line. `classify_lines` yields exactly one block
/// per input line, so block indices double as line numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    TableRow(String),
    MetaField { key: String, value: String },
    Bullet(String),
    Text(String),
    Empty,
}

impl Block {
    pub fn is_table_row(&self) -> bool {
        matches!(self, Block::TableRow(_))
    }
}

pub fn classify_lines(markdown: &str) -> Vec<Block> {
    markdown.lines().map(classify_line).collect()
}

fn classify_line(raw: &str) -> Block {
    let line = raw.trim();

    if line.is_empty() {
        return Block::Empty;
    }

    // ── Table row: | a | b | ──
    if line.starts_with('|') {
        return Block::TableRow(line.to_string());
    }

    // ── Heading: ## text ──
    if let Some(caps) = HEADING_RE.captures(line) {
        return Block::Heading {
            level: caps[1].len() as u8,
            text: caps[2].trim().to_string(),
        };
    }

    // ── Meta field: **Key:** Value ──
    if let Some(caps) = META_RE.captures(line) {
        return Block::MetaField {
            key: caps[1].trim().to_string(),
            value: caps[2].trim().to_string(),
        };
    }

    // ── Bullet: - text ──
    if let Some(caps) = BULLET_RE.captures(line) {
        return Block::Bullet(caps[1].trim().to_string());
    }

    Block::Text(line.to_string())
}
