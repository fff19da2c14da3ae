//! Loader for the clustered pickup table.
//!
//! The clustering stage writes one row per pickup with at least an id, a
//! load and a cluster label. Column names come from [`InputConfig`]. Load
//! cells are kept raw so the packer applies its own validity rules.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use haul_packer::{Item, LoadValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::InputConfig;

/// Cluster label used when the table has no cluster column.
pub const DEFAULT_CLUSTER: &str = "0";

#[derive(Debug, Error)]
pub enum PickupError {
    #[error("failed to read pickup table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse pickup table: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// One row of the table, reduced to what packing needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub item: Item,
    pub cluster: String,
}

#[derive(Debug, Clone, Default)]
pub struct PickupTable {
    pub pickups: Vec<Pickup>,
}

impl PickupTable {
    pub fn from_path(path: &Path, input: &InputConfig) -> Result<Self, PickupError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, input)
    }

    pub fn from_reader<R: Read>(reader: R, input: &InputConfig) -> Result<Self, PickupError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let id_idx = column_index(&headers, &input.id_column)?;
        let load_idx = column_index(&headers, &input.load_column)?;
        let cluster_idx = headers.iter().position(|h| h == input.cluster_column);
        if cluster_idx.is_none() {
            debug!(
                column = %input.cluster_column,
                "no cluster column, treating table as a single cluster"
            );
        }

        let mut pickups = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // Header is row 1.
            let row = row_idx + 2;

            let id = record.get(id_idx).unwrap_or("");
            if id.is_empty() {
                warn!(row, "skipping pickup row without an id");
                continue;
            }

            let load = match record.get(load_idx) {
                Some(raw) if !raw.is_empty() => LoadValue::Text(raw.to_string()),
                _ => LoadValue::Missing,
            };

            let cluster = cluster_idx
                .and_then(|idx| record.get(idx))
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CLUSTER)
                .to_string();

            pickups.push(Pickup {
                item: Item {
                    id: id.to_string(),
                    load,
                },
                cluster,
            });
        }

        debug!(rows = pickups.len(), "loaded pickup table");
        Ok(Self { pickups })
    }

    /// Group items by cluster, keeping row order inside each cluster.
    pub fn by_cluster(&self) -> BTreeMap<String, Vec<Item>> {
        let mut groups: BTreeMap<String, Vec<Item>> = BTreeMap::new();
        for pickup in &self.pickups {
            groups
                .entry(pickup.cluster.clone())
                .or_default()
                .push(pickup.item.clone());
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, PickupError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PickupError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUSTERED: &str = "\
farmer_id,village,latitude,longitude,load_kg,cluster
F001,Alpha,12.97,77.59,4000,1
F002,Alpha,12.98,77.60,3000,0
F003,Beta,13.01,77.61,bad,1
F004,Beta,13.02,77.62,,0
F005,Gamma,13.05,77.65, 1000 ,1
";

    fn load(csv: &str) -> PickupTable {
        PickupTable::from_reader(csv.as_bytes(), &InputConfig::default()).unwrap()
    }

    #[test]
    fn test_loads_all_rows() {
        let table = load(CLUSTERED);
        assert_eq!(table.len(), 5);
        assert_eq!(table.pickups[0].item, Item::text("F001", "4000"));
        assert_eq!(table.pickups[0].cluster, "1");
    }

    #[test]
    fn test_empty_load_cell_is_missing() {
        let table = load(CLUSTERED);
        assert_eq!(table.pickups[3].item.load, LoadValue::Missing);
    }

    #[test]
    fn test_load_cell_is_trimmed() {
        let table = load(CLUSTERED);
        assert_eq!(table.pickups[4].item.load_kg(), Some(1000.0));
    }

    #[test]
    fn test_groups_by_cluster_in_row_order() {
        let groups = load(CLUSTERED).by_cluster();

        assert_eq!(groups.len(), 2);
        let ids: Vec<&str> = groups["1"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["F001", "F003", "F005"]);
        let ids: Vec<&str> = groups["0"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["F002", "F004"]);
    }

    #[test]
    fn test_without_cluster_column() {
        let table = load("farmer_id,load_kg\nA,100\nB,200\n");
        let groups = table.by_cluster();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[DEFAULT_CLUSTER].len(), 2);
    }

    #[test]
    fn test_short_row_has_missing_load() {
        let table = load("farmer_id,load_kg,cluster\nA\n");
        assert_eq!(table.pickups[0].item, Item::missing("A"));
        assert_eq!(table.pickups[0].cluster, DEFAULT_CLUSTER);
    }

    #[test]
    fn test_row_without_id_is_skipped() {
        let table = load("farmer_id,load_kg\n,100\nB,200\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.pickups[0].item.id, "B");
    }

    #[test]
    fn test_missing_load_column() {
        let result = PickupTable::from_reader(
            "farmer_id,weight\nA,100\n".as_bytes(),
            &InputConfig::default(),
        );
        assert!(matches!(result, Err(PickupError::MissingColumn(c)) if c == "load_kg"));
    }

    #[test]
    fn test_custom_column_names() {
        let input = InputConfig {
            id_column: "pickup".to_string(),
            load_column: "kg".to_string(),
            cluster_column: "zone".to_string(),
        };
        let table = PickupTable::from_reader("pickup,kg,zone\nP1,750,north\n".as_bytes(), &input)
            .unwrap();

        assert_eq!(table.pickups[0].item, Item::text("P1", "750"));
        assert_eq!(table.pickups[0].cluster, "north");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clustered.csv");
        std::fs::write(&path, CLUSTERED).unwrap();

        let table = PickupTable::from_path(&path, &InputConfig::default()).unwrap();
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PickupTable::from_path(&dir.path().join("nope.csv"), &InputConfig::default());
        assert!(matches!(result, Err(PickupError::Io(_))));
    }
}
