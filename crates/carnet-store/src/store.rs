//! Main store implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use carnet_types::{FuelRecord, MaintenanceRecord, VehicleProfile};

use crate::error::{Error, Result};

pub(crate) const MAINTENANCE_FILE: &str = "maintenance.csv";
pub(crate) const FUEL_FILE: &str = "fuel.csv";
pub(crate) const REGISTRY_FILE: &str = "vehicles.json";
pub(crate) const RECEIPTS_DIR: &str = "receipts";
pub(crate) const PHOTOS_DIR: &str = "photos";

/// The vehicle registry, keyed by display name.
///
/// A `BTreeMap` keeps iteration (and therefore every listing) sorted by
/// name without an extra sort step.
pub type Registry = BTreeMap<String, VehicleProfile>;

/// Row counts removed by [`Store::remove_vehicle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedRecords {
    /// Whether a registry entry existed and was removed.
    pub profile: bool,
    /// Maintenance rows removed.
    pub maintenance: usize,
    /// Fuel rows removed.
    pub fuel: usize,
}

/// Flat-file store for one logbook.
///
/// All operations are synchronous read-modify-write cycles against files
/// under a single data directory. Saves overwrite the whole file.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open or create a logbook at the given directory.
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();

        for dir in [
            root.clone(),
            root.join(RECEIPTS_DIR),
            root.join(PHOTOS_DIR),
        ] {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(|e| Error::CreateDirectory {
                    path: dir.clone(),
                    source: e,
                })?;
            }
        }

        info!("Opening logbook at {}", root.display());
        Ok(Self { root })
    }

    /// Open the default logbook location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_data_dir())
    }

    /// The data directory this store operates on.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_table<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.root.join(file);
        if !path.exists() {
            debug!("{} does not exist yet, loading empty table", path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|e| Error::Table {
            path: path.clone(),
            source: e,
        })?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| Error::Table {
                path: path.clone(),
                source: e,
            })?;

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn save_table<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<()> {
        let path = self.root.join(file);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| Error::Table {
            path: path.clone(),
            source: e,
        })?;
        for row in rows {
            writer.serialize(row).map_err(|e| Error::Table {
                path: path.clone(),
                source: e,
            })?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

// Maintenance table operations
impl Store {
    /// Load the maintenance table. A missing file yields an empty table.
    pub fn load_maintenance(&self) -> Result<Vec<MaintenanceRecord>> {
        self.load_table(MAINTENANCE_FILE)
    }

    /// Overwrite the maintenance table.
    pub fn save_maintenance(&self, rows: &[MaintenanceRecord]) -> Result<()> {
        self.save_table(MAINTENANCE_FILE, rows)
    }

    /// Append one maintenance record.
    pub fn append_maintenance(&self, record: MaintenanceRecord) -> Result<()> {
        let mut rows = self.load_maintenance()?;
        rows.push(record);
        self.save_maintenance(&rows)
    }

    /// Replace every maintenance row of one vehicle with the given rows,
    /// keeping other vehicles' rows untouched (bulk table edit).
    ///
    /// The replacement rows are re-tagged with the vehicle name, so edits
    /// cannot move a row to another vehicle by accident.
    pub fn replace_vehicle_maintenance(
        &self,
        vehicle: &str,
        rows: Vec<MaintenanceRecord>,
    ) -> Result<()> {
        let mut all: Vec<MaintenanceRecord> = self
            .load_maintenance()?
            .into_iter()
            .filter(|r| r.vehicle != vehicle)
            .collect();
        all.extend(rows.into_iter().map(|mut r| {
            r.vehicle = vehicle.to_string();
            r
        }));
        self.save_maintenance(&all)
    }
}

// Fuel table operations
impl Store {
    /// Load the fuel table. A missing file yields an empty table.
    pub fn load_fuel(&self) -> Result<Vec<FuelRecord>> {
        self.load_table(FUEL_FILE)
    }

    /// Overwrite the fuel table.
    pub fn save_fuel(&self, rows: &[FuelRecord]) -> Result<()> {
        self.save_table(FUEL_FILE, rows)
    }

    /// Append one fuel record as given.
    ///
    /// Consumption is an insert-time derivation that belongs to carnet-core;
    /// callers compute it against the loaded table before appending.
    pub fn append_fuel(&self, record: FuelRecord) -> Result<()> {
        let mut rows = self.load_fuel()?;
        rows.push(record);
        self.save_fuel(&rows)
    }

    /// Replace every fuel row of one vehicle, keeping other vehicles' rows.
    pub fn replace_vehicle_fuel(&self, vehicle: &str, rows: Vec<FuelRecord>) -> Result<()> {
        let mut all: Vec<FuelRecord> = self
            .load_fuel()?
            .into_iter()
            .filter(|r| r.vehicle != vehicle)
            .collect();
        all.extend(rows.into_iter().map(|mut r| {
            r.vehicle = vehicle.to_string();
            r
        }));
        self.save_fuel(&all)
    }
}

// Registry operations
impl Store {
    /// Load the vehicle registry. A missing file yields an empty registry.
    pub fn load_registry(&self) -> Result<Registry> {
        let path = self.root.join(REGISTRY_FILE);
        if !path.exists() {
            debug!("{} does not exist yet, loading empty registry", path.display());
            return Ok(Registry::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrite the vehicle registry.
    pub fn save_registry(&self, registry: &Registry) -> Result<()> {
        let path = self.root.join(REGISTRY_FILE);
        let content = serde_json::to_string_pretty(registry)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Delete a vehicle's registry entry and cascade deletion of its
    /// maintenance and fuel rows.
    pub fn remove_vehicle(&self, name: &str) -> Result<RemovedRecords> {
        let mut registry = self.load_registry()?;
        let profile = registry.remove(name).is_some();
        self.save_registry(&registry)?;

        let maintenance = self.load_maintenance()?;
        let kept: Vec<MaintenanceRecord> = maintenance
            .iter()
            .filter(|r| r.vehicle != name)
            .cloned()
            .collect();
        let removed_maintenance = maintenance.len() - kept.len();
        self.save_maintenance(&kept)?;

        let fuel = self.load_fuel()?;
        let kept: Vec<FuelRecord> = fuel.iter().filter(|r| r.vehicle != name).cloned().collect();
        let removed_fuel = fuel.len() - kept.len();
        self.save_fuel(&kept)?;

        info!(
            "Removed vehicle '{}' ({} maintenance rows, {} fuel rows)",
            name, removed_maintenance, removed_fuel
        );

        Ok(RemovedRecords {
            profile,
            maintenance: removed_maintenance,
            fuel: removed_fuel,
        })
    }
}

/// Give vehicles that appear in the record tables but not in the registry a
/// placeholder profile. Returns how many were added.
pub fn adopt_orphans(registry: &mut Registry, records: &[MaintenanceRecord]) -> usize {
    let mut added = 0;
    for record in records {
        if record.vehicle.is_empty() {
            continue;
        }
        if !registry.contains_key(&record.vehicle) {
            registry.insert(record.vehicle.clone(), VehicleProfile::placeholder());
            added += 1;
        }
    }
    if added > 0 {
        info!("Adopted {} vehicle(s) found only in record tables", added);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use carnet_types::dates;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("logbook")).unwrap();
        (dir, store)
    }

    fn maintenance_row(vehicle: &str, mileage: u32) -> MaintenanceRecord {
        MaintenanceRecord {
            date: dates::parse("2024-02-20").ok(),
            vehicle: vehicle.to_string(),
            mileage,
            description: "Oil change".to_string(),
            cost: Some(120.0),
            attachment: None,
        }
    }

    fn fuel_row(vehicle: &str, mileage: u32) -> FuelRecord {
        FuelRecord {
            date: dates::parse("2024-02-21").ok(),
            vehicle: vehicle.to_string(),
            mileage,
            liters: 45.2,
            total_price: 82.3,
            consumption: 6.1,
        }
    }

    #[test]
    fn test_open_creates_directory_tree() {
        let (_dir, store) = test_store();
        assert!(store.root().join(RECEIPTS_DIR).is_dir());
        assert!(store.root().join(PHOTOS_DIR).is_dir());
    }

    #[test]
    fn test_missing_tables_load_empty() {
        let (_dir, store) = test_store();
        assert!(store.load_maintenance().unwrap().is_empty());
        assert!(store.load_fuel().unwrap().is_empty());
        assert!(store.load_registry().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_table_is_an_error() {
        let (_dir, store) = test_store();
        // A header the deserializer can live with, but a mileage cell that
        // is not a number.
        fs::write(
            store.root().join(MAINTENANCE_FILE),
            "date,vehicle,mileage,description,cost,attachment\n2024-01-01,C5,not-a-number,x,,\n",
        )
        .unwrap();
        assert!(store.load_maintenance().is_err());
    }

    #[test]
    fn test_maintenance_round_trip_preserves_fields() {
        let (_dir, store) = test_store();
        let rows = vec![
            maintenance_row("C5", 120_000),
            MaintenanceRecord {
                date: None,
                vehicle: "Twingo".to_string(),
                mileage: 98_500,
                description: "Timing belt".to_string(),
                cost: None,
                attachment: Some("receipts/20240110_093000_belt.pdf".into()),
            },
        ];
        store.save_maintenance(&rows).unwrap();
        assert_eq!(store.load_maintenance().unwrap(), rows);
    }

    #[test]
    fn test_fuel_round_trip_preserves_fields() {
        let (_dir, store) = test_store();
        let rows = vec![fuel_row("C5", 120_400), fuel_row("C5", 121_100)];
        store.save_fuel(&rows).unwrap();
        assert_eq!(store.load_fuel().unwrap(), rows);
    }

    #[test]
    fn test_append_maintenance() {
        let (_dir, store) = test_store();
        store.append_maintenance(maintenance_row("C5", 1)).unwrap();
        store.append_maintenance(maintenance_row("C5", 2)).unwrap();
        let rows = store.load_maintenance().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].mileage, 2);
    }

    #[test]
    fn test_replace_vehicle_keeps_other_rows() {
        let (_dir, store) = test_store();
        store
            .save_maintenance(&[
                maintenance_row("C5", 10),
                maintenance_row("Twingo", 20),
                maintenance_row("C5", 30),
            ])
            .unwrap();

        store
            .replace_vehicle_maintenance("C5", vec![maintenance_row("C5", 99)])
            .unwrap();

        let rows = store.load_maintenance().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.vehicle == "Twingo" && r.mileage == 20));
        assert!(rows.iter().any(|r| r.vehicle == "C5" && r.mileage == 99));
    }

    #[test]
    fn test_replace_vehicle_retags_rows() {
        let (_dir, store) = test_store();
        store
            .replace_vehicle_maintenance("C5", vec![maintenance_row("SomethingElse", 5)])
            .unwrap();
        let rows = store.load_maintenance().unwrap();
        assert_eq!(rows[0].vehicle, "C5");
    }

    #[test]
    fn test_registry_round_trip_sorted() {
        let (_dir, store) = test_store();
        let mut registry = Registry::new();
        registry.insert("Twingo".to_string(), VehicleProfile::placeholder());
        registry.insert("BMW".to_string(), VehicleProfile::placeholder());
        store.save_registry(&registry).unwrap();

        let loaded = store.load_registry().unwrap();
        let names: Vec<&String> = loaded.keys().collect();
        assert_eq!(names, ["BMW", "Twingo"]);
    }

    #[test]
    fn test_remove_vehicle_cascades() {
        let (_dir, store) = test_store();
        let mut registry = Registry::new();
        registry.insert("C5".to_string(), VehicleProfile::placeholder());
        registry.insert("Twingo".to_string(), VehicleProfile::placeholder());
        store.save_registry(&registry).unwrap();
        store
            .save_maintenance(&[maintenance_row("C5", 1), maintenance_row("Twingo", 2)])
            .unwrap();
        store
            .save_fuel(&[fuel_row("C5", 1), fuel_row("C5", 2), fuel_row("Twingo", 3)])
            .unwrap();

        let removed = store.remove_vehicle("C5").unwrap();
        assert_eq!(
            removed,
            RemovedRecords {
                profile: true,
                maintenance: 1,
                fuel: 2,
            }
        );

        // No orphaned rows remain for the deleted vehicle.
        assert!(store.load_maintenance().unwrap().iter().all(|r| r.vehicle != "C5"));
        assert!(store.load_fuel().unwrap().iter().all(|r| r.vehicle != "C5"));
        assert!(!store.load_registry().unwrap().contains_key("C5"));
    }

    #[test]
    fn test_remove_unknown_vehicle_is_a_no_op() {
        let (_dir, store) = test_store();
        let removed = store.remove_vehicle("Ghost").unwrap();
        assert_eq!(
            removed,
            RemovedRecords {
                profile: false,
                maintenance: 0,
                fuel: 0,
            }
        );
    }

    #[test]
    fn test_adopt_orphans() {
        let mut registry = Registry::new();
        registry.insert("C5".to_string(), VehicleProfile::placeholder());
        let records = vec![
            maintenance_row("C5", 1),
            maintenance_row("Kangoo", 2),
            maintenance_row("Kangoo", 3),
        ];

        let added = adopt_orphans(&mut registry, &records);
        assert_eq!(added, 1);
        assert!(registry.contains_key("Kangoo"));
        assert_eq!(registry["Kangoo"].make, "Unknown");
    }

    #[test]
    fn test_missing_columns_backfilled() {
        let (_dir, store) = test_store();
        // Older file without cost/attachment columns.
        fs::write(
            store.root().join(MAINTENANCE_FILE),
            "date,vehicle,mileage,description\n2024-01-01,C5,120000,Brakes\n,Twingo,5000,\n",
        )
        .unwrap();

        let rows = store.load_maintenance().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cost, None);
        assert_eq!(rows[0].attachment, None);
        assert_eq!(rows[1].date, None);
        assert_eq!(rows[1].description, "");
    }
}
