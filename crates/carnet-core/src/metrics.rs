//! Simple derived metrics over a vehicle's records.

use carnet_types::{FuelRecord, MaintenanceRecord};

/// Current odometer reading: the highest mileage across a vehicle's
/// maintenance records, 0 when there are none.
#[must_use]
pub fn current_mileage(maintenance: &[MaintenanceRecord]) -> u32 {
    maintenance.iter().map(|r| r.mileage).max().unwrap_or(0)
}

/// Cumulative maintenance spend. Rows without a cost count as zero.
#[must_use]
pub fn total_cost(maintenance: &[MaintenanceRecord]) -> f64 {
    maintenance.iter().filter_map(|r| r.cost).sum()
}

/// Fuel consumption in liters per 100 km for one fill-up.
///
/// Returns 0 when the distance delta is not positive, which also covers a
/// fill-up logged with a mileage at or below the previous one.
#[must_use]
pub fn compute_consumption(previous_mileage: u32, mileage: u32, liters: f64) -> f64 {
    if mileage <= previous_mileage {
        return 0.0;
    }
    let distance = f64::from(mileage - previous_mileage);
    round2(liters / distance * 100.0)
}

/// Derive the consumption of a new fill-up from the existing fuel table.
///
/// The reference is the highest-mileage prior record of the same vehicle;
/// without one the consumption is 0.
pub fn derive_consumption(existing: &[FuelRecord], record: &mut FuelRecord) {
    let previous = existing
        .iter()
        .filter(|r| r.vehicle == record.vehicle)
        .map(|r| r.mileage)
        .max();

    record.consumption = match previous {
        Some(previous_mileage) => compute_consumption(previous_mileage, record.mileage, record.liters),
        None => 0.0,
    };
}

/// Mean of the strictly positive computed consumptions, or `None` when
/// there is nothing to average (first fill-ups carry a 0).
#[must_use]
pub fn average_consumption(fuel: &[FuelRecord]) -> Option<f64> {
    let values: Vec<f64> = fuel
        .iter()
        .map(|r| r.consumption)
        .filter(|c| *c > 0.0)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
