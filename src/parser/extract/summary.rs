use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::blocks::Block;
use crate::parser::normalize::strip_bold;
use crate::parser::sections::{matching, Section};

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^summary\b").unwrap());
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?):\s*(.*)$").unwrap());

/// `- Label: **Value**` bullets of the first `## Summary` section. Scanning
/// stops at the next level-2 heading.
pub fn extract(blocks: &[Block], sections: &[Section]) -> BTreeMap<String, String> {
    let mut summary = BTreeMap::new();
    let Some(section) = matching(sections, 2, &SUMMARY_RE).into_iter().next() else {
        return summary;
    };

    for block in &blocks[section.body()] {
        let Block::Bullet(text) = block else {
            continue;
        };
        let Some(caps) = ITEM_RE.captures(text) else {
            continue;
        };
        let key = strip_bold(&caps[1]);
        if key.is_empty() {
            continue;
        }
        summary.entry(key).or_insert_with(|| strip_bold(&caps[2]));
    }

    summary
}
