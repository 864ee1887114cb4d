use std::collections::BTreeMap;

use super::parameter_map;
use crate::parser::blocks::Block;
use crate::parser::sections::Section;
use crate::parser::table::parse_table;

const INPUT_PARAMETERS: &str = "Input Parameters";

/// The first `Input Parameters` table in the report, at any heading level.
pub fn extract(blocks: &[Block], sections: &[Section]) -> BTreeMap<String, String> {
    sections
        .iter()
        .find(|s| s.title.trim().eq_ignore_ascii_case(INPUT_PARAMETERS))
        .map(|s| parameter_map(&parse_table(&s.first_table(blocks))))
        .unwrap_or_default()
}
