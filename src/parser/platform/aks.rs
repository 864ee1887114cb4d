use crate::parser::blocks::Block;
use crate::parser::context::{AksSizing, Diagnostics, NodePool, SnapshotStorage};
use crate::parser::extract::{parameter_map, snapshot};
use crate::parser::normalize::{canonical_pool_name, strip_bold};
use crate::parser::sections::{titled, Section};
use crate::parser::table::{parse_table, Row};

const POOL: &[&str] = &["Pool", "Name"];
const VM_SIZE: &[&str] = &["VM SKU", "VM Size", "SKU"];
const VCPU: &[&str] = &["vCPU", "vCPU/node"];
const RAM: &[&str] = &["RAM (GB)", "RAM/node (GB)"];
const DISK: &[&str] = &["Disk (GB)", "Disk/node (GB)"];
const NODES: &[&str] = &["Nodes", "Node Count", "Count"];

const NODE_CONFIGURATION: &str = "Node Configuration";
const NODE_POOLS: &str = "Node Pools";
const INPUT_PARAMETERS: &str = "Input Parameters";

fn in_scope(scopes: &[&Section], line: usize) -> bool {
    scopes.iter().any(|scope| scope.contains(line))
}

/// A level-3 section titled `title`, preferring one inside an AKS section.
fn subsection<'a>(sections: &'a [Section], scopes: &[&Section], title: &str) -> Option<&'a Section> {
    let candidates = titled(sections, 3, title);
    candidates
        .iter()
        .find(|s| in_scope(scopes, s.heading_line))
        .or_else(|| candidates.first())
        .copied()
}

fn table_rows(blocks: &[Block], section: Option<&Section>) -> Vec<Row> {
    section
        .map(|s| parse_table(&s.first_table(blocks)))
        .unwrap_or_default()
}

fn node_pool(table: &str, row: &Row, diagnostics: &mut Diagnostics) -> Option<NodePool> {
    if row.is_total(POOL) {
        return None;
    }
    let label = strip_bold(row.get(POOL)?);
    if label.is_empty() {
        return None;
    }

    let location = format!("{table}: {label}");
    let mut number = |aliases: &[&str]| {
        row.get(aliases)
            .map(|raw| diagnostics.number(&location, aliases[0], raw))
            .unwrap_or(0.0)
    };

    Some(NodePool {
        name: canonical_pool_name(&label),
        vm_size: row.get(VM_SIZE).map(strip_bold).unwrap_or_default(),
        vcpu: number(VCPU),
        ram_gb: number(RAM),
        disk_size_gb: number(DISK),
        node_count: (number(NODES).trunc() as i64).max(0),
    })
}

/// Node pools from `### Node Configuration` merged by canonical name with
/// `### Node Pools`, plus snapshot storage and the AKS input parameters.
/// `aks` holds every level-2 section naming AKS; a report may split its
/// AKS material across several of them.
pub fn extract(
    text: &str,
    blocks: &[Block],
    sections: &[Section],
    aks: &[&Section],
    diagnostics: &mut Diagnostics,
) -> AksSizing {
    let tables = [
        (
            NODE_CONFIGURATION,
            table_rows(blocks, subsection(sections, aks, NODE_CONFIGURATION)),
        ),
        (
            NODE_POOLS,
            table_rows(blocks, subsection(sections, aks, NODE_POOLS)),
        ),
    ];

    let mut node_pools: Vec<NodePool> = Vec::new();
    for (table, rows) in &tables {
        for row in rows {
            let Some(pool) = node_pool(table, row, diagnostics) else {
                continue;
            };
            match node_pools.iter_mut().find(|p| p.name == pool.name) {
                Some(existing) => existing.fill_from(&pool),
                None => node_pools.push(pool),
            }
        }
    }

    let snapshot_storage_gb = snapshot::explicit_total(text)
        .or_else(|| snapshot::summary_total(text))
        .unwrap_or(0.0);

    // Strictly inside an AKS section; a same-named table elsewhere belongs
    // to another part of the report.
    let input_parameters = titled(sections, 3, INPUT_PARAMETERS)
        .into_iter()
        .find(|s| in_scope(aks, s.heading_line))
        .map(|s| parameter_map(&parse_table(&s.first_table(blocks))))
        .unwrap_or_default();

    tracing::debug!(
        pools = node_pools.len(),
        snapshot_storage_gb,
        input_parameters = input_parameters.len(),
        "aks sizing"
    );

    AksSizing {
        node_pools,
        storage: SnapshotStorage {
            snapshot_storage_gb,
        },
        input_parameters,
    }
}
