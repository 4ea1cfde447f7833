//! Derived logic for the carnet vehicle logbook.
//!
//! Everything in this crate is a pure, single-pass computation over loaded
//! records: no background work, no suspension points, no retries.
//!
//! # Features
//!
//! - **Service alerts**: classify oil-change drift into `NoHistory` / `Ok` /
//!   `DueSoon` / `Overdue` with configurable thresholds
//! - **Metrics**: fuel consumption, cumulative spend, current mileage
//! - **Reports**: alert summary rendered as a `mailto:` link
//! - **Dossier**: one merged PDF per vehicle — tabular recap plus every
//!   receipt, images converted to captioned pages first
//!
//! # Example
//!
//! ```
//! use carnet_core::{AlertEvaluator, OilChangeStatus};
//!
//! let evaluator = AlertEvaluator::default();
//! assert_eq!(evaluator.evaluate(120_000, &[]), OilChangeStatus::NoHistory);
//! ```

pub mod alerts;
pub mod dossier;
mod error;
pub mod merge;
pub mod metrics;
pub mod report;

pub use alerts::{AlertConfig, AlertEvaluator, OilChangeStatus};
pub use dossier::{DossierReport, dossier_file_name, generate_dossier};
pub use error::{Error, Result};
pub use report::VehicleReport;
