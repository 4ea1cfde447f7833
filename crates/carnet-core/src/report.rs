//! Vehicle status report rendered as a mail-compose link.
//!
//! Nothing is sent by carnet itself; the link opens the user's mail client
//! with subject and body pre-filled.

use serde::Serialize;

use crate::alerts::OilChangeStatus;

/// A plain-text status report for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleReport {
    pub subject: String,
    pub body: String,
}

impl VehicleReport {
    /// Build a report from the alert evaluator's output.
    #[must_use]
    pub fn build(vehicle: &str, current_mileage: u32, status: &OilChangeStatus) -> Self {
        let subject = format!("Report - {vehicle}");
        let mut body = format!("Status {vehicle} ({current_mileage} km):\n\n");
        if status.needs_attention() {
            body.push_str("ALERTS:\n");
            body.push_str(&status.headline());
        } else {
            body.push_str(&status.headline());
        }
        Self { subject, body }
    }

    /// Percent-encoded `mailto:` link with the subject and body pre-filled.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_report_has_no_alert_block() {
        let report = VehicleReport::build(
            "Twingo",
            98_000,
            &OilChangeStatus::Ok { since_service: 4_000 },
        );
        assert_eq!(report.subject, "Report - Twingo");
        assert!(report.body.contains("98000 km"));
        assert!(!report.body.contains("ALERTS"));
    }

    #[test]
    fn test_overdue_report_lists_alert() {
        let report =
            VehicleReport::build("C5", 131_000, &OilChangeStatus::Overdue { by: 1_000 });
        assert!(report.body.contains("ALERTS:"));
        assert!(report.body.contains("URGENT"));
    }

    #[test]
    fn test_mailto_is_percent_encoded() {
        let report = VehicleReport::build("Citroen c5", 10_000, &OilChangeStatus::NoHistory);
        let link = report.mailto();
        assert!(link.starts_with("mailto:?subject="));
        assert!(link.contains("Report%20-%20Citroen%20c5"));
        assert!(link.contains("&body="));
        // Raw spaces and newlines never survive encoding.
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }
}
