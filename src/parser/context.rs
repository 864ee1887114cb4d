//! Output records: the raw extraction (`ParsedReport`) and the
//! generator-facing `SizingContext` assembled from it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::normalize::strict_number;

pub const SIZING_REPORT_SOURCE: &str = "sizing_report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aks,
    OpenShift,
    Rke2,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Aks => "aks",
            Platform::OpenShift => "openshift",
            Platform::Rke2 => "rke2",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter table of one `## <TIER> Tier Calculation` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCalculation {
    pub tier_name: String,
    pub parameters: BTreeMap<String, String>,
}

impl TierCalculation {
    /// Parameter value by name, ignoring case.
    pub fn parameter(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| {
            self.parameters
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePool {
    pub name: String,
    pub vm_size: String,
    pub vcpu: f64,
    pub ram_gb: f64,
    pub disk_size_gb: f64,
    pub node_count: i64,
}

impl NodePool {
    /// Fill fields this pool lacks (zero or empty) from `other`.
    pub fn fill_from(&mut self, other: &NodePool) {
        if self.vm_size.is_empty() {
            self.vm_size.clone_from(&other.vm_size);
        }
        if self.vcpu == 0.0 {
            self.vcpu = other.vcpu;
        }
        if self.ram_gb == 0.0 {
            self.ram_gb = other.ram_gb;
        }
        if self.disk_size_gb == 0.0 {
            self.disk_size_gb = other.disk_size_gb;
        }
        if self.node_count == 0 {
            self.node_count = other.node_count;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStorage {
    pub snapshot_storage_gb: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AksSizing {
    pub node_pools: Vec<NodePool>,
    pub storage: SnapshotStorage,
    pub input_parameters: BTreeMap<String, String>,
}

impl AksSizing {
    pub fn pool(&self, name: &str) -> Option<&NodePool> {
        self.node_pools.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerPool {
    pub name: String,
    pub workers: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    pub pool_name: String,
    pub vcpu: f64,
    pub ram_gb: f64,
}

/// `worker_pools[i]` and `worker_config[i]` describe the same pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenShiftSizing {
    pub worker_pools: Vec<WorkerPool>,
    pub worker_config: Vec<WorkerConfig>,
}

/// A numeric cell that only parsed through the lenient zero default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericFailure {
    pub location: String,
    pub field: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub numeric_failures: Vec<NumericFailure>,
}

impl Diagnostics {
    /// Lenient coercion that remembers non-empty cells failing the strict parse.
    pub fn number(&mut self, location: &str, field: &str, raw: &str) -> f64 {
        match strict_number(raw) {
            Some(v) => v,
            None => {
                if !raw.trim().is_empty() {
                    tracing::trace!(location, field, raw, "non-numeric cell defaulted to 0");
                    self.numeric_failures.push(NumericFailure {
                        location: location.to_string(),
                        field: field.to_string(),
                        raw: raw.to_string(),
                    });
                }
                0.0
            }
        }
    }

    pub fn int(&mut self, location: &str, field: &str, raw: &str) -> i64 {
        self.number(location, field, raw).trunc() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.numeric_failures.is_empty()
    }
}

/// Everything extracted from one report, before generator-facing shaping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    pub platform_detected: Option<Platform>,
    pub metadata: BTreeMap<String, String>,
    pub tiers: BTreeMap<String, TierCalculation>,
    pub frozen_nodes: SnapshotStorage,
    pub summary: BTreeMap<String, String>,
    pub inputs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openshift: Option<OpenShiftSizing>,
    pub diagnostics: Diagnostics,
}

/// Per-tier node shape in the units the manifest generators expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierNodes {
    pub tier: String,
    pub count: i64,
    pub memory: String,
    pub cpu: String,
    pub storage: String,
}

const COUNT_PARAMS: &[&str] = &["Nodes", "Node Count", "Number of Nodes", "Data Nodes"];
const MEMORY_PARAMS: &[&str] = &[
    "RAM per Node (GB)",
    "RAM/node (GB)",
    "Memory per Node (GB)",
    "RAM (GB)",
];
const CPU_PARAMS: &[&str] = &["vCPU per Node", "vCPU/node", "vCPU"];
const STORAGE_PARAMS: &[&str] = &[
    "Storage per Node (GB)",
    "Disk per Node (GB)",
    "Disk/node (GB)",
    "Disk (GB)",
];

impl TierNodes {
    pub fn from_tier(tier: &TierCalculation) -> Self {
        let value = |names: &[&str]| {
            tier.parameter(names)
                .and_then(strict_number)
                .unwrap_or(0.0)
        };
        Self {
            tier: tier.tier_name.clone(),
            count: (value(COUNT_PARAMS).trunc() as i64).max(0),
            memory: format!("{}Gi", quantity(value(MEMORY_PARAMS))),
            cpu: quantity(value(CPU_PARAMS)),
            storage: format!("{}Gi", quantity(value(STORAGE_PARAMS))),
        }
    }
}

fn quantity(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// The normalized record consumed by the manifest and Terraform generators.
///
/// `aks` and `openshift` are present only when the report had the matching
/// platform heading; callers branch on presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingContext {
    pub source: String,
    pub platform_detected: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    pub metadata: BTreeMap<String, String>,
    pub tiers: BTreeMap<String, TierCalculation>,
    pub frozen_nodes: SnapshotStorage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_nodes: Option<TierNodes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold_nodes: Option<TierNodes>,
    pub summary: BTreeMap<String, String>,
    /// First `Input Parameters` table anywhere in the report.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksSizing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift: Option<OpenShiftSizing>,
}

impl From<ParsedReport> for SizingContext {
    fn from(parsed: ParsedReport) -> Self {
        let health_score = parsed
            .metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("Health Score"))
            .and_then(|(_, v)| strict_number(v));
        let data_nodes = parsed.tiers.get("hot").map(TierNodes::from_tier);
        let cold_nodes = parsed.tiers.get("cold").map(TierNodes::from_tier);

        Self {
            source: SIZING_REPORT_SOURCE.to_string(),
            platform_detected: parsed.platform_detected,
            health_score,
            metadata: parsed.metadata,
            tiers: parsed.tiers,
            frozen_nodes: parsed.frozen_nodes,
            data_nodes,
            cold_nodes,
            summary: parsed.summary,
            inputs: parsed.inputs,
            aks: parsed.aks,
            openshift: parsed.openshift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(name: &str, rows: &[(&str, &str)]) -> TierCalculation {
        TierCalculation {
            tier_name: name.to_string(),
            parameters: rows
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn platform_wire_names() {
        assert_eq!(serde_json::to_string(&Platform::OpenShift).unwrap(), "\"openshift\"");
        assert_eq!(serde_json::to_string(&Platform::Aks).unwrap(), "\"aks\"");
        assert_eq!(Platform::Rke2.to_string(), "rke2");
    }

    #[test]
    fn tier_nodes_quantities() {
        let t = tier(
            "hot",
            &[
                ("nodes", "3"),
                ("RAM per Node (GB)", "64"),
                ("vCPU per Node", "8"),
                ("Storage per Node (GB)", "1,024.5"),
            ],
        );
        let n = TierNodes::from_tier(&t);
        assert_eq!(n.count, 3);
        assert_eq!(n.memory, "64Gi");
        assert_eq!(n.cpu, "8");
        assert_eq!(n.storage, "1024.5Gi");
    }

    #[test]
    fn tier_nodes_missing_fields_are_zero() {
        let n = TierNodes::from_tier(&tier("cold", &[("Retention (days)", "30")]));
        assert_eq!(n.count, 0);
        assert_eq!(n.memory, "0Gi");
    }

    #[test]
    fn diagnostics_record_non_empty_failures_only() {
        let mut d = Diagnostics::default();
        assert_eq!(d.number("Node Pools: Hot Pool", "Nodes", "N/A"), 0.0);
        assert_eq!(d.number("Node Pools: Hot Pool", "Pods", ""), 0.0);
        assert_eq!(d.int("Node Pools: Hot Pool", "vCPU", "8"), 8);
        assert_eq!(d.numeric_failures.len(), 1);
        assert_eq!(d.numeric_failures[0].raw, "N/A");
    }

    #[test]
    fn fill_from_prefers_existing_values() {
        let mut a = NodePool {
            name: "eshot".into(),
            vm_size: "Standard_E8s_v5".into(),
            vcpu: 8.0,
            ..Default::default()
        };
        let b = NodePool {
            name: "eshot".into(),
            vm_size: "other".into(),
            vcpu: 16.0,
            node_count: 3,
            ..Default::default()
        };
        a.fill_from(&b);
        assert_eq!(a.vm_size, "Standard_E8s_v5");
        assert_eq!(a.vcpu, 8.0);
        assert_eq!(a.node_count, 3);
    }

    #[test]
    fn context_from_parsed_report() {
        let mut parsed = ParsedReport::default();
        parsed.metadata.insert("Health Score".into(), "85".into());
        parsed.tiers.insert("hot".into(), tier("hot", &[("Nodes", "3")]));
        let ctx = SizingContext::from(parsed);
        assert_eq!(ctx.source, "sizing_report");
        assert_eq!(ctx.health_score, Some(85.0));
        assert_eq!(ctx.data_nodes.as_ref().map(|n| n.count), Some(3));
        assert!(ctx.cold_nodes.is_none());

        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json.get("aks").is_none());
        assert!(json.get("openshift").is_none());
        assert!(json["platform_detected"].is_null());
    }
}
