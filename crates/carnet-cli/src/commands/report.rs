//! Mail report command.

use std::path::PathBuf;

use anyhow::Result;

use carnet_core::{VehicleReport, metrics};
use carnet_store::Store;

use crate::commands::status::evaluator_from_config;
use crate::config::Config;
use crate::util::write_output;

pub fn cmd_report(
    store: &Store,
    vehicle: &str,
    config: &Config,
    output: Option<&PathBuf>,
    quiet: bool,
) -> Result<()> {
    let records: Vec<_> = store
        .load_maintenance()?
        .into_iter()
        .filter(|r| r.vehicle == vehicle)
        .collect();

    let current_mileage = metrics::current_mileage(&records);
    let status = evaluator_from_config(config).evaluate(current_mileage, &records);
    let report = VehicleReport::build(vehicle, current_mileage, &status);

    if !quiet {
        eprintln!("Open this link to send the report from your mail client:");
    }
    write_output(output, &format!("{}\n", report.mailto()))
}
