//! Dossier export command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use carnet_core::{dossier_file_name, generate_dossier};
use carnet_store::Store;

pub fn cmd_dossier(
    store: &Store,
    vehicle: &str,
    file: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let records: Vec<_> = store
        .load_maintenance()?
        .into_iter()
        .filter(|r| r.vehicle == vehicle)
        .collect();

    let dest = file.unwrap_or_else(|| PathBuf::from(dossier_file_name(vehicle)));
    let report = generate_dossier(vehicle, &records, &dest)
        .with_context(|| format!("Failed to generate dossier for '{}'", vehicle))?;

    if !quiet {
        println!(
            "Wrote {} ({} entries, {:.2} EUR total, {} receipts attached{})",
            report.output.display(),
            records.len(),
            report.total_cost,
            report.appended,
            if report.skipped > 0 {
                format!(", {} skipped", report.skipped)
            } else {
                String::new()
            }
        );
    }
    Ok(())
}
