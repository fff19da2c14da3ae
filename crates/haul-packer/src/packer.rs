//! Best-fit decreasing packing of one group of pickups.
//!
//! Items are taken largest first. Before every placement the open trucks are
//! re-ordered by remaining capacity, tightest first, and the item goes into
//! the first truck it fits. When none fits a new truck is opened.
//!
//! Two orderings are kept apart:
//! 1. The working order, recomputed before each placement, drives the scan.
//! 2. The creation order, fixed when a truck is opened, is the output order.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{PackError, PackResult};
use crate::item::Item;

/// A truck in a finished packing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carrier {
    pub item_ids: Vec<String>,
    /// Sum of assigned loads.
    pub load_kg: f64,
    /// Capacity left, clamped at zero for an oversized singleton.
    pub remaining_kg: f64,
}

impl Carrier {
    pub fn utilization(&self, capacity: f64) -> f64 {
        self.load_kg / capacity
    }

    /// True for the one case where a truck carries more than its capacity:
    /// a single item heavier than the truck.
    pub fn is_oversized(&self, capacity: f64) -> bool {
        self.load_kg > capacity
    }
}

/// A truck while packing is in progress.
struct Slot {
    created: usize,
    carrier: Carrier,
}

/// Pack `items` into trucks of `capacity` kg and return the id lists.
///
/// Invalid items (missing, unparseable or non-positive load) are skipped.
/// Trucks are returned in the order they were opened.
pub fn pack(items: &[Item], capacity: f64) -> PackResult<Vec<Vec<String>>> {
    let carriers = pack_carriers(items, capacity)?;
    Ok(carriers.into_iter().map(|c| c.item_ids).collect())
}

/// Same as [`pack`], keeping each truck's load and remaining capacity.
pub fn pack_carriers(items: &[Item], capacity: f64) -> PackResult<Vec<Carrier>> {
    validate_capacity(capacity)?;

    let mut valid: Vec<(&Item, f64)> = items
        .iter()
        .filter_map(|item| match item.load_kg() {
            Some(kg) => Some((item, kg)),
            None => {
                debug!(item = %item.id, load = ?item.load, "skipping item with invalid load");
                None
            }
        })
        .collect();

    // Stable: equal loads keep their input order.
    valid.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut slots: Vec<Slot> = Vec::new();

    for (item, load) in valid {
        slots.sort_by(|a, b| {
            a.carrier
                .remaining_kg
                .total_cmp(&b.carrier.remaining_kg)
                .then(a.created.cmp(&b.created))
        });

        match slots.iter_mut().find(|s| s.carrier.remaining_kg >= load) {
            Some(slot) => {
                slot.carrier.item_ids.push(item.id.clone());
                slot.carrier.load_kg += load;
                slot.carrier.remaining_kg -= load;
                debug!(
                    item = %item.id,
                    load,
                    truck = slot.created,
                    remaining = slot.carrier.remaining_kg,
                    "placed item"
                );
            }
            None => {
                let created = slots.len();
                if load > capacity {
                    warn!(
                        item = %item.id,
                        load,
                        capacity,
                        "item exceeds truck capacity, assigning its own truck"
                    );
                }
                debug!(item = %item.id, load, truck = created, "opened truck");
                slots.push(Slot {
                    created,
                    carrier: Carrier {
                        item_ids: vec![item.id.clone()],
                        load_kg: load,
                        remaining_kg: (capacity - load).max(0.0),
                    },
                });
            }
        }
    }

    slots.sort_by_key(|s| s.created);

    info!(
        items = items.len(),
        trucks = slots.len(),
        capacity,
        "packed items into trucks"
    );

    Ok(slots.into_iter().map(|s| s.carrier).collect())
}

pub(crate) fn validate_capacity(capacity: f64) -> PackResult<()> {
    if capacity.is_finite() && capacity > 0.0 {
        Ok(())
    } else {
        Err(PackError::InvalidCapacity(capacity))
    }
}
