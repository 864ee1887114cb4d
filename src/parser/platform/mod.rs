//! Target-platform detection and the per-platform extraction routines.

pub mod aks;
pub mod openshift;

use std::sync::LazyLock;

use regex::Regex;

use super::context::Platform;
use super::sections::Section;

/// Level-2 heading patterns, highest priority first. Detection returns the
/// platform of the first pattern that matches any heading, wherever that
/// heading sits in the document.
///
/// | # | pattern              | platform  |
/// |---|----------------------|-----------|
/// | 1 | `\bAKS\b`            | aks       |
/// | 2 | `Azure Kubernetes`   | aks       |
/// | 3 | `\bOpenShift\b`      | openshift |
/// | 4 | `\bOCP\b`            | openshift |
/// | 5 | `\bRKE2\b`           | rke2      |
/// | 6 | `\bRancher\b`        | rke2      |
pub const PLATFORM_PRIORITY: &[(&str, Platform)] = &[
    (r"\bAKS\b", Platform::Aks),
    (r"Azure Kubernetes", Platform::Aks),
    (r"\bOpenShift\b", Platform::OpenShift),
    (r"\bOCP\b", Platform::OpenShift),
    (r"\bRKE2\b", Platform::Rke2),
    (r"\bRancher\b", Platform::Rke2),
];

static PLATFORM_RULES: LazyLock<Vec<(Regex, Platform)>> = LazyLock::new(|| {
    PLATFORM_PRIORITY
        .iter()
        .map(|(pattern, platform)| (Regex::new(&format!("(?i){pattern}")).unwrap(), *platform))
        .collect()
});

fn is_platform_heading(section: &Section, rule: &(Regex, Platform)) -> bool {
    section.level == 2 && rule.0.is_match(&section.title)
}

pub fn detect(sections: &[Section]) -> Option<Platform> {
    let detected = PLATFORM_RULES
        .iter()
        .find(|rule| sections.iter().any(|s| is_platform_heading(s, rule)))
        .map(|(_, platform)| *platform);
    tracing::debug!(platform = ?detected, "platform detection");
    detected
}

/// Every level-2 section whose heading names `platform`, in document order.
pub fn heading_sections(sections: &[Section], platform: Platform) -> Vec<&Section> {
    sections
        .iter()
        .filter(|s| {
            PLATFORM_RULES
                .iter()
                .filter(|(_, p)| *p == platform)
                .any(|rule| is_platform_heading(s, rule))
        })
        .collect()
}

/// The first level-2 section whose heading names `platform`.
pub fn heading_section(sections: &[Section], platform: Platform) -> Option<&Section> {
    heading_sections(sections, platform).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::classify_lines;
    use crate::parser::sections::scan_sections;

    fn detect_in(md: &str) -> Option<Platform> {
        detect(&scan_sections(&classify_lines(md)))
    }

    #[test]
    fn aks_variants() {
        assert_eq!(detect_in("## AKS/ECK Deployment"), Some(Platform::Aks));
        assert_eq!(detect_in("## Azure Kubernetes Service"), Some(Platform::Aks));
        assert_eq!(detect_in("## aks cluster"), Some(Platform::Aks));
    }

    #[test]
    fn openshift_and_rke2() {
        assert_eq!(detect_in("## OpenShift Container Platform"), Some(Platform::OpenShift));
        assert_eq!(detect_in("## OCP 4.14 Workers"), Some(Platform::OpenShift));
        assert_eq!(detect_in("## Rancher RKE2"), Some(Platform::Rke2));
    }

    #[test]
    fn priority_beats_document_position() {
        let md = "## OpenShift Notes\n\n## RKE2 Notes\n\n## AKS Deployment";
        assert_eq!(detect_in(md), Some(Platform::Aks));
        assert_eq!(detect_in("## RKE2\n## OCP"), Some(Platform::OpenShift));
    }

    #[test]
    fn substring_and_level_rules() {
        assert_eq!(detect_in("## Kubernetes Deployment"), None);
        assert_eq!(detect_in("## OAKSHIRE datacenter"), None);
        assert_eq!(detect_in("### AKS Deployment"), None);
        assert_eq!(detect_in("Deploy on AKS"), None);
    }

    #[test]
    fn heading_section_finds_platform_block() {
        let sections = scan_sections(&classify_lines("## Summary\n## OpenShift Sizing\n| a |"));
        let s = heading_section(&sections, Platform::OpenShift).unwrap();
        assert_eq!(s.title, "OpenShift Sizing");
        assert!(heading_section(&sections, Platform::Aks).is_none());
    }

    #[test]
    fn heading_sections_lists_every_platform_block() {
        let sections = scan_sections(&classify_lines("## AKS Overview
## Summary
## AKS Node Pools"));
        let titles: Vec<&str> = heading_sections(&sections, Platform::Aks)
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["AKS Overview", "AKS Node Pools"]);
    }
}
