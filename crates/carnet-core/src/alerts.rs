//! Oil-change drift classification.
//!
//! This module classifies how far a vehicle has driven since its last
//! logged oil change into actionable categories, with configurable
//! thresholds.
//!
//! # Example
//!
//! ```
//! use carnet_core::{AlertEvaluator, OilChangeStatus};
//! use carnet_types::MaintenanceRecord;
//!
//! let history = vec![MaintenanceRecord {
//!     date: None,
//!     vehicle: "C5".into(),
//!     mileage: 100_000,
//!     description: "Oil change + filter".into(),
//!     cost: Some(90.0),
//!     attachment: None,
//! }];
//!
//! let evaluator = AlertEvaluator::default();
//! let status = evaluator.evaluate(110_000, &history);
//! assert_eq!(status, OilChangeStatus::Ok { since_service: 10_000 });
//! ```

use serde::{Deserialize, Serialize};

use carnet_types::MaintenanceRecord;

/// Oil-change status for a vehicle at its current mileage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OilChangeStatus {
    /// No maintenance record mentions an oil change.
    NoHistory,
    /// Within the service interval.
    Ok {
        /// Distance driven since the last oil change.
        since_service: u32,
    },
    /// Approaching the service interval.
    DueSoon {
        /// Distance driven since the last oil change.
        since_service: u32,
    },
    /// Past the service interval.
    Overdue {
        /// Distance driven beyond the service interval.
        by: u32,
    },
}

impl OilChangeStatus {
    /// One-line message for this status, used by the status display and the
    /// mail report.
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            OilChangeStatus::NoHistory => "No oil-change history".to_string(),
            OilChangeStatus::Ok { since_service } => {
                format!("Oil change OK ({since_service} km since service)")
            }
            OilChangeStatus::DueSoon { since_service } => {
                format!("PLAN AHEAD: oil change due soon (+{since_service} km)")
            }
            OilChangeStatus::Overdue { by } => {
                format!("URGENT: oil change overdue (+{by} km)")
            }
        }
    }

    /// Whether this status warrants attention in a report.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        !matches!(self, OilChangeStatus::Ok { .. })
    }
}

/// Configuration for oil-change drift thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Case-insensitive term that marks a maintenance record as an oil
    /// change. Matching is substring-based, not exact.
    pub service_term: String,
    /// Drift above this is "due soon".
    pub due_soon_km: u32,
    /// Drift above this is overdue.
    pub overdue_km: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            service_term: "oil change".to_string(),
            due_soon_km: 12_000,
            overdue_km: 15_000,
        }
    }
}

/// Drift evaluator for a vehicle's maintenance history.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    config: AlertConfig,
}

impl AlertEvaluator {
    /// Create an evaluator with the given configuration.
    #[must_use]
    pub fn new(config: AlertConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Classify the oil-change drift at the given current mileage.
    ///
    /// The reference record is the matching record with the **highest
    /// mileage**, independent of row order. Records are matched by
    /// case-insensitive substring search for the configured service term.
    #[must_use]
    pub fn evaluate(&self, current_mileage: u32, records: &[MaintenanceRecord]) -> OilChangeStatus {
        let term = self.config.service_term.to_lowercase();
        let last_service = records
            .iter()
            .filter(|r| r.description.to_lowercase().contains(&term))
            .map(|r| r.mileage)
            .max();

        let Some(service_mileage) = last_service else {
            return OilChangeStatus::NoHistory;
        };

        let drift = current_mileage.saturating_sub(service_mileage);
        if drift > self.config.overdue_km {
            OilChangeStatus::Overdue {
                by: drift - self.config.overdue_km,
            }
        } else if drift > self.config.due_soon_km {
            OilChangeStatus::DueSoon {
                since_service: drift,
            }
        } else {
            OilChangeStatus::Ok {
                since_service: drift,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str, mileage: u32) -> MaintenanceRecord {
        MaintenanceRecord {
            date: None,
            vehicle: "C5".to_string(),
            mileage,
            description: description.to_string(),
            cost: None,
            attachment: None,
        }
    }

    #[test]
    fn test_no_history() {
        let evaluator = AlertEvaluator::default();
        assert_eq!(evaluator.evaluate(50_000, &[]), OilChangeStatus::NoHistory);

        let unrelated = vec![record("Brake pads", 40_000)];
        assert_eq!(
            evaluator.evaluate(50_000, &unrelated),
            OilChangeStatus::NoHistory
        );
    }

    #[test]
    fn test_overdue_magnitude() {
        let evaluator = AlertEvaluator::default();
        let history = vec![record("Oil change", 100_000)];
        assert_eq!(
            evaluator.evaluate(116_000, &history),
            OilChangeStatus::Overdue { by: 1_000 }
        );
    }

    #[test]
    fn test_ok_reports_drift() {
        let evaluator = AlertEvaluator::default();
        let history = vec![record("Oil change", 100_000)];
        assert_eq!(
            evaluator.evaluate(110_000, &history),
            OilChangeStatus::Ok {
                since_service: 10_000
            }
        );
    }

    #[test]
    fn test_boundary_values() {
        let evaluator = AlertEvaluator::default();
        let history = vec![record("Oil change", 0)];
        // Exact boundaries
        assert_eq!(
            evaluator.evaluate(12_000, &history),
            OilChangeStatus::Ok {
                since_service: 12_000
            }
        );
        assert_eq!(
            evaluator.evaluate(12_001, &history),
            OilChangeStatus::DueSoon {
                since_service: 12_001
            }
        );
        assert_eq!(
            evaluator.evaluate(15_000, &history),
            OilChangeStatus::DueSoon {
                since_service: 15_000
            }
        );
        assert_eq!(
            evaluator.evaluate(15_001, &history),
            OilChangeStatus::Overdue { by: 1 }
        );
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let evaluator = AlertEvaluator::default();
        let history = vec![record("Full service: OIL CHANGE, filters, coolant", 80_000)];
        assert_eq!(
            evaluator.evaluate(81_000, &history),
            OilChangeStatus::Ok {
                since_service: 1_000
            }
        );
    }

    #[test]
    fn test_selects_highest_mileage_match() {
        let evaluator = AlertEvaluator::default();
        // Later service listed first: row order must not matter.
        let history = vec![
            record("Oil change", 110_000),
            record("Oil change", 90_000),
            record("Tires", 111_000),
        ];
        assert_eq!(
            evaluator.evaluate(112_000, &history),
            OilChangeStatus::Ok {
                since_service: 2_000
            }
        );
    }

    #[test]
    fn test_mileage_behind_service_saturates() {
        let evaluator = AlertEvaluator::default();
        // Typo'd current mileage below the service record.
        let history = vec![record("Oil change", 100_000)];
        assert_eq!(
            evaluator.evaluate(99_000, &history),
            OilChangeStatus::Ok { since_service: 0 }
        );
    }

    #[test]
    fn test_custom_config() {
        let evaluator = AlertEvaluator::new(AlertConfig {
            service_term: "vidange".to_string(),
            due_soon_km: 5_000,
            overdue_km: 7_500,
        });
        let history = vec![record("Vidange moteur", 10_000)];
        assert_eq!(
            evaluator.evaluate(16_000, &history),
            OilChangeStatus::DueSoon {
                since_service: 6_000
            }
        );
        assert_eq!(
            evaluator.evaluate(18_000, &history),
            OilChangeStatus::Overdue { by: 500 }
        );
    }

    #[test]
    fn test_headlines() {
        assert!(OilChangeStatus::NoHistory.headline().contains("No oil-change"));
        assert!(
            OilChangeStatus::Overdue { by: 1_000 }
                .headline()
                .contains("URGENT")
        );
        assert!(!OilChangeStatus::Ok { since_service: 5 }.needs_attention());
        assert!(OilChangeStatus::NoHistory.needs_attention());
    }
}
