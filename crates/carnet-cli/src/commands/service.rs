//! Maintenance logging commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use carnet_store::Store;
use carnet_types::MaintenanceRecord;

use crate::cli::{OutputFormat, ServiceAction};
use crate::format::{FormatOptions, format_maintenance_csv, format_maintenance_text};
use crate::util::{parse_date_or_today, write_output};

pub fn cmd_service(
    store: &Store,
    action: ServiceAction,
    output: Option<&PathBuf>,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    match action {
        ServiceAction::Add {
            vehicle,
            mileage,
            description,
            date,
            cost,
            receipt,
        } => {
            let date = parse_date_or_today(date.as_deref())?;

            // Copy the receipt into the store first, so the record always
            // points at a file carnet owns.
            let attachment = match receipt {
                Some(source) => {
                    if !source.exists() {
                        bail!("Receipt file not found: {}", source.display());
                    }
                    Some(
                        store
                            .add_attachment(&source)
                            .with_context(|| format!("Failed to store {}", source.display()))?,
                    )
                }
                None => None,
            };

            store.append_maintenance(MaintenanceRecord {
                date: Some(date),
                vehicle: vehicle.clone(),
                mileage,
                description,
                cost,
                attachment,
            })?;

            if !quiet {
                println!("Logged maintenance entry for '{}'", vehicle);
            }
            Ok(())
        }
        ServiceAction::List {
            vehicle,
            format,
            no_header,
        } => {
            let mut rows = store.load_maintenance()?;
            if let Some(vehicle) = vehicle {
                rows.retain(|r| r.vehicle == vehicle);
            }

            let opts = opts.with_no_header(no_header);
            let content = match format {
                OutputFormat::Json => opts.as_json(&rows)?,
                OutputFormat::Csv => format_maintenance_csv(&rows, &opts),
                OutputFormat::Text => format_maintenance_text(&rows, &opts),
            };
            write_output(output, &content)
        }
    }
}
