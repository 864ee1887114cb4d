use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::parameter_map;
use crate::parser::blocks::Block;
use crate::parser::context::TierCalculation;
use crate::parser::sections::{matching, Section};
use crate::parser::table::parse_table;

static TIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(HOT|COLD|WARM|FROZEN)\s+Tier Calculation").unwrap());

/// One `TierCalculation` per `## <TIER> Tier Calculation` heading, built
/// only from the first table inside that heading's own section.
pub fn extract(blocks: &[Block], sections: &[Section]) -> BTreeMap<String, TierCalculation> {
    let mut tiers = BTreeMap::new();

    for section in matching(sections, 2, &TIER_RE) {
        let Some(caps) = TIER_RE.captures(&section.title) else {
            continue;
        };
        let tier_name = caps[1].to_lowercase();
        if tiers.contains_key(&tier_name) {
            continue;
        }
        let parameters = parameter_map(&parse_table(&section.first_table(blocks)));
        tracing::trace!(tier = %tier_name, rows = parameters.len(), "tier calculation");
        tiers.insert(
            tier_name.clone(),
            TierCalculation {
                tier_name,
                parameters,
            },
        );
    }

    tiers
}
