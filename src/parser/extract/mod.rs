pub mod inputs;
pub mod metadata;
pub mod snapshot;
pub mod summary;
pub mod tiers;

use std::collections::BTreeMap;

use tracing::debug;

use super::blocks::Block;
use super::context::{Diagnostics, ParsedReport, Platform};
use super::normalize::strip_bold;
use super::platform;
use super::sections::Section;
use super::table::Row;

const PARAMETER: &[&str] = &["Parameter", "Metric"];
const VALUE: &[&str] = &["Value"];

/// Run every extraction routine over the classified report. Each routine
/// reads the blocks independently, so their order does not matter.
pub fn extract_all(text: &str, blocks: &[Block], sections: &[Section]) -> ParsedReport {
    let mut diagnostics = Diagnostics::default();

    let metadata = metadata::extract(blocks);
    let tiers = tiers::extract(blocks, sections);
    let summary = summary::extract(blocks, sections);
    let inputs = inputs::extract(blocks, sections);
    let frozen_nodes = snapshot::extract(text, &tiers, &mut diagnostics);

    let platform_detected = platform::detect(sections);
    let aks_sections = platform::heading_sections(sections, Platform::Aks);
    let aks = (!aks_sections.is_empty()).then(|| {
        platform::aks::extract(text, blocks, sections, &aks_sections, &mut diagnostics)
    });
    let openshift = platform::heading_section(sections, Platform::OpenShift)
        .map(|s| platform::openshift::extract(blocks, s, &mut diagnostics));

    debug!(
        sections = sections.len(),
        tiers = tiers.len(),
        platform = ?platform_detected,
        numeric_failures = diagnostics.numeric_failures.len(),
        "extracted sizing report"
    );

    ParsedReport {
        source_path: None,
        platform_detected,
        metadata,
        tiers,
        frozen_nodes,
        summary,
        inputs,
        aks,
        openshift,
        diagnostics,
    }
}

/// `Parameter | Value` rows as a lookup map; first row wins on duplicates.
pub fn parameter_map(rows: &[Row]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for row in rows {
        let Some(name) = row.get(PARAMETER).map(strip_bold) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let value = row.get(VALUE).map(strip_bold).unwrap_or_default();
        map.entry(name).or_insert(value);
    }
    map
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::classify_lines;
    use crate::parser::sections::scan_sections;
    use crate::parser::table::parse_table;

    fn parse(fixture: &str) -> ParsedReport {
        let md = std::fs::read_to_string(format!("tests/fixtures/{}.md", fixture)).unwrap();
        let blocks = classify_lines(&md);
        let sections = scan_sections(&blocks);
        extract_all(&md, &blocks, &sections)
    }

    #[test]
    fn parameter_map_first_wins_and_strips_bold() {
        let rows = parse_table(&[
            "| Parameter | Value |",
            "|---|---|",
            "| Nodes | **3** |",
            "| Nodes | 9 |",
            "| | orphan |",
        ]);
        let map = parameter_map(&rows);
        assert_eq!(map.len(), 1);
        assert_eq!(map["Nodes"], "3");
    }

    #[test]
    fn aks_fixture() {
        let parsed = parse("aks_eck");
        assert_eq!(parsed.platform_detected, Some(Platform::Aks));
        assert_eq!(parsed.metadata["Health Score"], "85");
        assert_eq!(
            parsed.tiers.keys().collect::<Vec<_>>(),
            vec!["cold", "frozen", "hot"]
        );
        let aks = parsed.aks.as_ref().unwrap();
        let names: Vec<&str> = aks.node_pools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["system", "eshot", "escold", "esfrozen", "esml"]);
        assert!(parsed.openshift.is_none());
        assert_eq!(parsed.frozen_nodes.snapshot_storage_gb, 15000.0);
        assert_eq!(parsed.inputs["Daily ingest (GB)"], "250");
        assert!(!parsed.inputs.contains_key("Region"));
    }

    #[test]
    fn aks_fixture_reports_non_numeric_cell() {
        let parsed = parse("aks_eck");
        let failures = &parsed.diagnostics.numeric_failures;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].raw, "N/A");
        assert_eq!(failures[0].location, "Node Configuration: Cold Pool");
    }

    #[test]
    fn openshift_fixture() {
        let parsed = parse("openshift");
        assert_eq!(parsed.platform_detected, Some(Platform::OpenShift));
        assert!(parsed.aks.is_none());
        let ocp = parsed.openshift.as_ref().unwrap();
        assert_eq!(ocp.worker_pools.len(), ocp.worker_config.len());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn minimal_fixture() {
        let parsed = parse("minimal");
        assert_eq!(parsed.platform_detected, None);
        assert_eq!(parsed.summary["Total nodes"], "7");
        assert!(parsed.tiers.is_empty());
        assert_eq!(parsed.frozen_nodes.snapshot_storage_gb, 0.0);
    }

    #[test]
    fn rke2_is_detected_without_sub_record() {
        let md = "## RKE2 Cluster\n\n| Pool | Nodes |\n|---|---|\n| Hot Pool | 3 |";
        let blocks = classify_lines(md);
        let sections = scan_sections(&blocks);
        let parsed = extract_all(md, &blocks, &sections);
        assert_eq!(parsed.platform_detected, Some(Platform::Rke2));
        assert!(parsed.aks.is_none());
        assert!(parsed.openshift.is_none());
    }
}
