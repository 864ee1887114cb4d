use std::ops::Range;

use regex::Regex;

use super::blocks::Block;

/// A heading and the line range it governs. The body runs from the line
/// after the heading up to the next heading of equal or higher level, or
/// to the end of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: u8,
    pub title: String,
    pub heading_line: usize,
    pub end: usize,
}

impl Section {
    pub fn body(&self) -> Range<usize> {
        self.heading_line + 1..self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        self.body().contains(&line)
    }

    /// The first contiguous run of table lines inside the body. Empty when
    /// the section has no table.
    pub fn first_table<'b>(&self, blocks: &'b [Block]) -> Vec<&'b str> {
        next_table(blocks, self.body())
            .map(|(lines, _)| lines)
            .unwrap_or_default()
    }

    /// Every contiguous run of table lines inside the body, in order.
    pub fn tables<'b>(&self, blocks: &'b [Block]) -> Vec<Vec<&'b str>> {
        let mut tables = Vec::new();
        let mut cursor = self.body();
        while let Some((lines, next)) = next_table(blocks, cursor.clone()) {
            tables.push(lines);
            cursor.start = next;
        }
        tables
    }
}

/// Skip forward to the first table row in `range`, then collect rows until
/// the first line that is not one. Returns the rows and the index after them.
fn next_table(blocks: &[Block], range: Range<usize>) -> Option<(Vec<&str>, usize)> {
    let end = range.end.min(blocks.len());
    let start = (range.start..end).find(|&i| blocks[i].is_table_row())?;

    let mut lines = Vec::new();
    let mut i = start;
    while i < end {
        match &blocks[i] {
            Block::TableRow(row) => lines.push(row.as_str()),
            _ => break,
        }
        i += 1;
    }
    Some((lines, i))
}

/// Turn the classified lines into one section per heading.
pub fn scan_sections(blocks: &[Block]) -> Vec<Section> {
    let headings: Vec<(usize, u8, &str)> = blocks
        .iter()
        .enumerate()
        .filter_map(|(i, b)| match b {
            Block::Heading { level, text } => Some((i, *level, text.as_str())),
            _ => None,
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(n, &(line, level, title))| {
            let end = headings[n + 1..]
                .iter()
                .find(|(_, l, _)| *l <= level)
                .map(|(i, _, _)| *i)
                .unwrap_or(blocks.len());
            Section {
                level,
                title: title.to_string(),
                heading_line: line,
                end,
            }
        })
        .collect()
}

/// Sections at `level` whose title matches `pattern`, in document order.
pub fn matching<'a>(sections: &'a [Section], level: u8, pattern: &Regex) -> Vec<&'a Section> {
    sections
        .iter()
        .filter(|s| s.level == level && pattern.is_match(&s.title))
        .collect()
}

/// Sections at `level` whose title is exactly `title`, ignoring case.
pub fn titled<'a>(sections: &'a [Section], level: u8, title: &str) -> Vec<&'a Section> {
    sections
        .iter()
        .filter(|s| s.level == level && s.title.trim().eq_ignore_ascii_case(title))
        .collect()
}

// ── Tests ──
