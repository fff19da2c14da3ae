//! Haul packer: assigns weighted pickups to capacity-limited trucks.
//!
//! Given one group of pickups and a truck capacity, the packer produces the
//! truck assignments using a best-fit decreasing heuristic. It knows nothing
//! about geography: the clustering stage hands it one group at a time.
//!
//! # Components
//!
//! - **`item`** — Pickup items and load coercion
//! - **`packer`** — Best-fit decreasing packing of a single group
//! - **`dispatch`** — Independent packing of every cluster in a batch

pub mod dispatch;
pub mod error;
pub mod item;
pub mod packer;

pub use dispatch::{ClusterPlan, cluster_order, pack_clusters};
pub use error::{PackError, PackResult};
pub use item::{Item, LoadValue};
pub use packer::{Carrier, pack, pack_carriers};
