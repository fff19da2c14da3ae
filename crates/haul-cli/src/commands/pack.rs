//! `haul pack`: load the clustered pickup table and assign trucks.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use haul_core::{HaulConfig, PickupTable};
use haul_packer::{ClusterPlan, pack_clusters};
use serde::Serialize;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "haul.toml";

/// Everything `haul pack` reports, in both output formats.
#[derive(Debug, Serialize)]
pub struct PackReport {
    pub capacity_kg: f64,
    pub clusters: Vec<ClusterPlan>,
}

impl PackReport {
    pub fn truck_count(&self) -> usize {
        self.clusters.iter().map(ClusterPlan::truck_count).sum()
    }
}

pub fn pack(input: &Path, config: Option<&Path>, capacity: Option<f64>, format: &str) -> Result<()> {
    let config = load_config(config, Path::new(DEFAULT_CONFIG))?;
    let report = build_report(input, &config, capacity)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print!("{}", format_report(&report));
        }
    }

    Ok(())
}

/// An explicit config path must exist; the default one is optional.
fn load_config(explicit: Option<&Path>, default_path: &Path) -> Result<HaulConfig> {
    match explicit {
        Some(path) => HaulConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if default_path.is_file() => HaulConfig::from_file(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display())),
        None => {
            debug!("no haul.toml found, using defaults");
            Ok(HaulConfig::default())
        }
    }
}

fn build_report(input: &Path, config: &HaulConfig, capacity: Option<f64>) -> Result<PackReport> {
    let capacity = capacity.unwrap_or(config.packing.capacity_kg);

    let table = PickupTable::from_path(input, &config.input)
        .with_context(|| format!("Failed to load pickups from {}", input.display()))?;
    info!(pickups = table.len(), path = %input.display(), "loaded pickups");

    let clusters = pack_clusters(&table.by_cluster(), capacity)?;

    Ok(PackReport {
        capacity_kg: capacity,
        clusters,
    })
}

pub fn format_report(report: &PackReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} trucks across {} clusters (capacity {:.1} kg)",
        report.truck_count(),
        report.clusters.len(),
        report.capacity_kg
    );

    for plan in &report.clusters {
        let _ = writeln!(
            out,
            "\nCluster {}: {} trucks, {:.1} kg",
            plan.cluster,
            plan.truck_count(),
            plan.total_load_kg()
        );
        for (n, carrier) in plan.carriers.iter().enumerate() {
            let flag = if carrier.is_oversized(report.capacity_kg) {
                "  OVERSIZED"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  Truck {:>2}  {:>9.1} kg  {:>5.1}%  {}{}",
                n + 1,
                carrier.load_kg,
                carrier.utilization(report.capacity_kg) * 100.0,
                carrier.item_ids.join(", "),
                flag
            );
        }
        if !plan.skipped.is_empty() {
            let _ = writeln!(out, "  Skipped (invalid load): {}", plan.skipped.join(", "));
        }
    }

    out
}
