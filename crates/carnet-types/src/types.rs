//! Record and profile types for the vehicle logbook.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::Date;

/// One maintenance event for a vehicle.
///
/// Rows are stored in the maintenance CSV table in exactly this column
/// order. Optional fields deserialize from empty cells as `None`, and
/// columns missing from an older file are back-filled with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    /// Day the work was done, if known.
    #[serde(default, with = "crate::dates::storage::option")]
    pub date: Option<Date>,
    /// Display name of the vehicle this row belongs to.
    pub vehicle: String,
    /// Odometer reading at the time of the event.
    #[serde(default)]
    pub mileage: u32,
    /// Free-text description of the work.
    #[serde(default)]
    pub description: String,
    /// Invoiced cost, if known.
    #[serde(default)]
    pub cost: Option<f64>,
    /// Path to the stored receipt, if one was uploaded.
    ///
    /// The path may dangle; callers must check existence before use.
    #[serde(default)]
    pub attachment: Option<PathBuf>,
}

impl MaintenanceRecord {
    /// The attachment path, if set and non-empty.
    ///
    /// This does not touch the filesystem; see [`attachment_on_disk`].
    ///
    /// [`attachment_on_disk`]: Self::attachment_on_disk
    #[must_use]
    pub fn attachment_path(&self) -> Option<&Path> {
        self.attachment
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// The attachment path, if set, non-empty, and present on disk.
    #[must_use]
    pub fn attachment_on_disk(&self) -> Option<&Path> {
        self.attachment_path().filter(|p| p.exists())
    }
}

/// One fuel fill-up for a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Day of the fill-up, if known.
    #[serde(default, with = "crate::dates::storage::option")]
    pub date: Option<Date>,
    /// Display name of the vehicle this row belongs to.
    pub vehicle: String,
    /// Odometer reading at the pump.
    #[serde(default)]
    pub mileage: u32,
    /// Liters filled.
    #[serde(default)]
    pub liters: f64,
    /// Total price paid.
    #[serde(default)]
    pub total_price: f64,
    /// Computed consumption in liters per 100 km.
    ///
    /// Derived at insert time from the previous fill-up of the same vehicle
    /// ordered by mileage; 0 when no valid prior record exists or the
    /// distance delta is not positive.
    #[serde(default)]
    pub consumption: f64,
}

/// Static description of one vehicle, keyed by display name in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Manufacturer, e.g. "Renault".
    #[serde(default)]
    pub make: String,
    /// Model designation.
    #[serde(default)]
    pub model: String,
    /// License plate.
    #[serde(default)]
    pub plate: String,
    /// Engine description, e.g. "1.6 HDi 110".
    #[serde(default)]
    pub engine: String,
    /// Oil capacity and grade, e.g. "4.0L (10W40)".
    #[serde(default)]
    pub oil_spec: String,
    /// Manufacturer consumption figure, e.g. "5.1L/100".
    #[serde(default)]
    pub theoretical_consumption: String,
}

impl VehicleProfile {
    /// Placeholder profile for a vehicle first seen in the record tables
    /// rather than registered explicitly.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            make: "Unknown".to_string(),
            model: "-".to_string(),
            plate: "-".to_string(),
            engine: "-".to_string(),
            oil_spec: "-".to_string(),
            theoretical_consumption: "-".to_string(),
        }
    }
}

/// Attachment classification by file extension.
///
/// Used by the dossier generator to decide how a receipt is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// A document that can be appended verbatim (`.pdf`).
    Document,
    /// A raster image that is converted to a single page first
    /// (`.jpg`, `.jpeg`, `.png`, `.webp`).
    Image,
    /// Anything else; skipped during dossier generation.
    Unknown,
}

impl AttachmentKind {
    /// Classify a path by its extension, case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use carnet_types::AttachmentKind;
    ///
    /// assert_eq!(AttachmentKind::from_path(Path::new("a/b.PDF")), AttachmentKind::Document);
    /// assert_eq!(AttachmentKind::from_path(Path::new("scan.jpeg")), AttachmentKind::Image);
    /// assert_eq!(AttachmentKind::from_path(Path::new("notes.txt")), AttachmentKind::Unknown);
    /// assert_eq!(AttachmentKind::from_path(Path::new("no_extension")), AttachmentKind::Unknown);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return AttachmentKind::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => AttachmentKind::Document,
            "jpg" | "jpeg" | "png" | "webp" => AttachmentKind::Image,
            _ => AttachmentKind::Unknown,
        }
    }
}
