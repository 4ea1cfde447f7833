//! Fuel logging commands.

use std::path::PathBuf;

use anyhow::Result;

use carnet_core::metrics;
use carnet_store::Store;
use carnet_types::FuelRecord;

use crate::cli::{FuelAction, OutputFormat};
use crate::format::{FormatOptions, format_fuel_csv, format_fuel_text};
use crate::util::{parse_date_or_today, write_output};

pub fn cmd_fuel(
    store: &Store,
    action: FuelAction,
    output: Option<&PathBuf>,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    match action {
        FuelAction::Add {
            vehicle,
            mileage,
            liters,
            price,
            date,
        } => {
            let date = parse_date_or_today(date.as_deref())?;

            let existing = store.load_fuel()?;
            let mut record = FuelRecord {
                date: Some(date),
                vehicle: vehicle.clone(),
                mileage,
                liters,
                total_price: price,
                consumption: 0.0,
            };
            metrics::derive_consumption(&existing, &mut record);
            let consumption = record.consumption;
            store.append_fuel(record)?;

            if !quiet {
                if consumption > 0.0 {
                    println!("Logged fill-up for '{}' ({:.2} L/100km)", vehicle, consumption);
                } else {
                    println!("Logged fill-up for '{}'", vehicle);
                }
            }
            Ok(())
        }
        FuelAction::List {
            vehicle,
            format,
            no_header,
        } => {
            let mut rows = store.load_fuel()?;
            if let Some(vehicle) = vehicle {
                rows.retain(|r| r.vehicle == vehicle);
            }

            let opts = opts.with_no_header(no_header);
            let content = match format {
                OutputFormat::Json => opts.as_json(&rows)?,
                OutputFormat::Csv => format_fuel_csv(&rows, &opts),
                OutputFormat::Text => format_fuel_text(&rows, &opts),
            };
            write_output(output, &content)
        }
    }
}
