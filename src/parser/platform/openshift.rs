use crate::parser::blocks::Block;
use crate::parser::context::{Diagnostics, OpenShiftSizing, WorkerConfig, WorkerPool};
use crate::parser::normalize::strip_bold;
use crate::parser::sections::Section;
use crate::parser::table::parse_table;

const POOL: &[&str] = &["Pool", "Name"];
const WORKERS: &[&str] = &["Workers", "Nodes"];
const VCPU: &[&str] = &["vCPU", "vCPU/node"];
const RAM: &[&str] = &["RAM (GB)", "RAM/node (GB)"];

/// Worker pools from every pool-bearing table in the OpenShift section.
/// Rows for the same pool across tables are merged, so the two output
/// lists stay one-to-one.
pub fn extract(
    blocks: &[Block],
    section: &Section,
    diagnostics: &mut Diagnostics,
) -> OpenShiftSizing {
    let mut pools: Vec<(WorkerPool, WorkerConfig)> = Vec::new();

    for table in section.tables(blocks) {
        let rows = parse_table(&table);
        let Some(header) = rows.first() else {
            continue;
        };
        if !header.has(POOL) || !(header.has(WORKERS) || header.has(VCPU) || header.has(RAM)) {
            continue;
        }

        for row in &rows {
            if row.is_total(POOL) {
                continue;
            }
            let name = row.get(POOL).map(strip_bold).unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let location = format!("{}: {name}", section.title);
            let workers = row
                .get(WORKERS)
                .map(|raw| diagnostics.int(&location, "Workers", raw).max(0))
                .unwrap_or(0);
            let vcpu = row
                .get(VCPU)
                .map(|raw| diagnostics.number(&location, "vCPU", raw))
                .unwrap_or(0.0);
            let ram_gb = row
                .get(RAM)
                .map(|raw| diagnostics.number(&location, "RAM (GB)", raw))
                .unwrap_or(0.0);

            match pools.iter_mut().find(|(p, _)| p.name == name) {
                Some((pool, config)) => {
                    if pool.workers == 0 {
                        pool.workers = workers;
                    }
                    if config.vcpu == 0.0 {
                        config.vcpu = vcpu;
                    }
                    if config.ram_gb == 0.0 {
                        config.ram_gb = ram_gb;
                    }
                }
                None => pools.push((
                    WorkerPool {
                        name: name.clone(),
                        workers,
                    },
                    WorkerConfig {
                        pool_name: name,
                        vcpu,
                        ram_gb,
                    },
                )),
            }
        }
    }

    tracing::debug!(pools = pools.len(), "openshift sizing");
    let (worker_pools, worker_config) = pools.into_iter().unzip();
    OpenShiftSizing {
        worker_pools,
        worker_config,
    }
}
