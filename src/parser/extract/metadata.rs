use std::collections::BTreeMap;

use crate::parser::blocks::Block;
use crate::parser::normalize::strip_bold;

/// `**Key:** Value` lines anywhere in the report. The first occurrence of a
/// key wins.
pub fn extract(blocks: &[Block]) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    for block in blocks {
        if let Block::MetaField { key, value } = block {
            metadata
                .entry(key.clone())
                .or_insert_with(|| strip_bold(value));
        }
    }
    metadata
}
