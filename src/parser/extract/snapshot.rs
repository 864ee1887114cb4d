use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::context::{Diagnostics, SnapshotStorage, TierCalculation};
use crate::parser::normalize::strict_number;

// `Snapshot Storage: **15,000 GB**` and `**Snapshot Storage:** 15,000 GB`
static EXPLICIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)snapshot storage:\**\s*\**\s*([\d.,]+)\s*GB").unwrap());
// `Total snapshot storage GB: **12,000**`
static SUMMARY_TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)total snapshot storage GB:\**\s*\**\s*([\d.,]+)").unwrap());

pub fn explicit_total(text: &str) -> Option<f64> {
    EXPLICIT_RE
        .captures(text)
        .and_then(|caps| strict_number(&caps[1]))
}

pub fn summary_total(text: &str) -> Option<f64> {
    SUMMARY_TOTAL_RE
        .captures(text)
        .and_then(|caps| strict_number(&caps[1]))
}

/// The tier's snapshot capacity parameter: a name with both "snapshot" and
/// "storage", else "snapshot" and "size". Cache parameters never match.
fn snapshot_parameter(tier: &TierCalculation) -> Option<(&String, &String)> {
    let named = |word: &str| {
        tier.parameters.iter().find(|(k, _)| {
            let k = k.to_lowercase();
            k.contains("snapshot") && k.contains(word)
        })
    };
    named("storage").or_else(|| named("size"))
}

fn tier_sum(tiers: &BTreeMap<String, TierCalculation>, diagnostics: &mut Diagnostics) -> f64 {
    tiers
        .values()
        .filter_map(|tier| {
            let (field, raw) = snapshot_parameter(tier)?;
            let location = format!("{} tier", tier.tier_name);
            Some(diagnostics.number(&location, field, raw))
        })
        .sum()
}

/// The sources overlap (a summary total usually restates the tier sums), so
/// the largest one is taken rather than their sum.
pub fn extract(
    text: &str,
    tiers: &BTreeMap<String, TierCalculation>,
    diagnostics: &mut Diagnostics,
) -> SnapshotStorage {
    let candidates = [
        tier_sum(tiers, diagnostics),
        summary_total(text).unwrap_or(0.0),
        explicit_total(text).unwrap_or(0.0),
    ];
    SnapshotStorage {
        snapshot_storage_gb: candidates.into_iter().fold(0.0, f64::max),
    }
}
