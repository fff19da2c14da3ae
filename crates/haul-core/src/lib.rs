pub mod config;
pub mod pickups;

pub use config::{ConfigError, HaulConfig, InputConfig, PackingConfig};
pub use pickups::{DEFAULT_CLUSTER, Pickup, PickupError, PickupTable};
