//! Core types for the carnet vehicle logbook.
//!
//! This crate defines the data model shared by every other carnet crate:
//! maintenance records, fuel records, vehicle profiles, and attachment
//! classification. It performs no I/O beyond checking whether an attachment
//! path still exists on disk.
//!
//! # Example
//!
//! ```
//! use carnet_types::{AttachmentKind, MaintenanceRecord};
//!
//! let record = MaintenanceRecord {
//!     date: None,
//!     vehicle: "Twingo".into(),
//!     mileage: 98_500,
//!     description: "Oil change + filter".into(),
//!     cost: Some(89.0),
//!     attachment: Some("receipts/20240110_093000_invoice.pdf".into()),
//! };
//!
//! assert_eq!(
//!     record.attachment.as_deref().map(AttachmentKind::from_path),
//!     Some(AttachmentKind::Document)
//! );
//! ```

pub mod dates;
mod error;
mod types;

pub use error::{ParseError, ParseResult};
pub use types::{AttachmentKind, FuelRecord, MaintenanceRecord, VehicleProfile};
