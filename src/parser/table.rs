//! Pipe-delimited Markdown table extraction shared by every table shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One data row keyed by header label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row(BTreeMap<String, String>);

impl Row {
    /// Value of the first alias present as a header, compared case-insensitively.
    pub fn get(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| {
            self.0
                .iter()
                .find(|(header, _)| header.eq_ignore_ascii_case(alias))
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn has(&self, aliases: &[&str]) -> bool {
        self.get(aliases).is_some()
    }

    /// Computed totals are written bold in the identity column (`**Total**`).
    pub fn is_total(&self, aliases: &[&str]) -> bool {
        self.get(aliases).is_some_and(|v| v.starts_with("**"))
    }
}

pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|c| c.trim().to_string()).collect()
}

fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Parse header, separator and data rows into row mappings.
///
/// The separator line is skipped unchecked. Short rows are padded with
/// empty strings, long rows truncated to the header width. Extraction stops
/// at the first line that is not a table line.
pub fn parse_table(lines: &[&str]) -> Vec<Row> {
    if lines.len() < 3 || !is_table_line(lines[0]) {
        return Vec::new();
    }

    let headers = split_cells(lines[0]);
    let mut rows = Vec::new();

    for line in &lines[2..] {
        if !is_table_line(line) {
            break;
        }
        let cells = split_cells(line);
        let mut map = BTreeMap::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = cells.get(i).cloned().unwrap_or_default();
            // Duplicate header labels: first column wins.
            map.entry(header.clone()).or_insert(value);
        }
        rows.push(Row(map));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_table() {
        let rows = parse_table(&["| Pool | Nodes |", "|---|---|", "| Hot Pool | 3 |"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(&["Pool"]), Some("Hot Pool"));
        assert_eq!(rows[0].get(&["Nodes"]), Some("3"));
    }

    #[test]
    fn fewer_than_three_lines_is_empty() {
        assert!(parse_table(&["| Pool | Nodes |", "|---|---|"]).is_empty());
        assert!(parse_table(&[]).is_empty());
    }

    #[test]
    fn column_order_is_irrelevant() {
        let a = parse_table(&[
            "| Pool | vCPU | RAM (GB) |",
            "|---|---|---|",
            "| Hot Pool | 8 | 64 |",
        ]);
        let b = parse_table(&[
            "| RAM (GB) | Pool | vCPU |",
            "|---|---|---|",
            "| 64 | Hot Pool | 8 |",
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn short_rows_pad_and_long_rows_truncate() {
        let rows = parse_table(&[
            "| A | B | C |",
            "|---|---|---|",
            "| 1 |",
            "| 1 | 2 | 3 | 4 | 5 |",
        ]);
        assert_eq!(rows[0].get(&["B"]), Some(""));
        assert_eq!(rows[0].get(&["C"]), Some(""));
        assert_eq!(rows[1].0.len(), 3);
        assert_eq!(rows[1].get(&["C"]), Some("3"));
    }

    #[test]
    fn stops_at_first_non_table_line() {
        let rows = parse_table(&["| A |", "|---|", "| 1 |", "not a row", "| 2 |"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn aliases_and_case() {
        let rows = parse_table(&["| name | NODES |", "|---|---|", "| Hot Pool | 6 |"]);
        assert_eq!(rows[0].get(&["Pool", "Name"]), Some("Hot Pool"));
        assert_eq!(rows[0].get(&["Workers", "Nodes"]), Some("6"));
        assert!(!rows[0].has(&["vCPU"]));
    }

    #[test]
    fn total_row_detection() {
        let rows = parse_table(&["| Pool | Nodes |", "|---|---|", "| Hot Pool | 3 |", "| **Total** | **3** |"]);
        assert!(!rows[0].is_total(&["Pool"]));
        assert!(rows[1].is_total(&["Pool"]));
    }

    #[test]
    fn split_without_outer_pipes() {
        assert_eq!(split_cells("a | b "), vec!["a", "b"]);
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
    }
}
