//! Per-cluster dispatch.
//!
//! The clustering stage groups pickups (by geography) and each group is
//! packed on its own. Pickups never move between clusters.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::error::PackResult;
use crate::item::Item;
use crate::packer::{Carrier, pack_carriers, validate_capacity};

/// Packing result for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPlan {
    pub cluster: String,
    pub carriers: Vec<Carrier>,
    /// Ids of items left out for an invalid load, in input order.
    pub skipped: Vec<String>,
}

impl ClusterPlan {
    pub fn truck_count(&self) -> usize {
        self.carriers.len()
    }

    pub fn total_load_kg(&self) -> f64 {
        self.carriers.iter().map(|c| c.load_kg).sum()
    }
}

/// Pack every cluster independently, ordered by [`cluster_order`].
///
/// Capacity is checked once up front so a bad value fails the whole batch
/// before any cluster is packed.
pub fn pack_clusters(
    groups: &BTreeMap<String, Vec<Item>>,
    capacity: f64,
) -> PackResult<Vec<ClusterPlan>> {
    validate_capacity(capacity)?;

    let mut ordered: Vec<(&String, &Vec<Item>)> = groups.iter().collect();
    ordered.sort_by(|a, b| cluster_order(a.0, b.0));

    let mut plans = Vec::with_capacity(groups.len());
    for (cluster, items) in ordered {
        let carriers = pack_carriers(items, capacity)?;
        let skipped: Vec<String> = items
            .iter()
            .filter(|item| item.load_kg().is_none())
            .map(|item| item.id.clone())
            .collect();

        info!(
            cluster = %cluster,
            trucks = carriers.len(),
            skipped = skipped.len(),
            "packed cluster"
        );

        plans.push(ClusterPlan {
            cluster: cluster.clone(),
            carriers,
            skipped,
        });
    }

    Ok(plans)
}

/// Integer labels (as emitted by k-means) sort numerically and come first,
/// so cluster 2 precedes cluster 10. Other labels sort as text.
pub fn cluster_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
