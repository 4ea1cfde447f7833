//! Vehicle registry commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use carnet_core::metrics;
use carnet_store::{Store, adopt_orphans};
use carnet_types::VehicleProfile;

use crate::cli::{OutputFormat, VehicleAction};
use crate::format::{FormatOptions, VehicleMetrics, format_vehicle_show_text, format_vehicles_text};
use crate::util::write_output;

pub fn cmd_vehicle(
    store: &Store,
    action: VehicleAction,
    output: Option<&PathBuf>,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    match action {
        VehicleAction::List { format } => list(store, format, output, opts),
        VehicleAction::Add {
            name,
            make,
            model,
            plate,
            engine,
            oil,
            consumption,
            photo,
        } => add(
            store,
            &name,
            VehicleProfile {
                make,
                model,
                plate,
                engine,
                oil_spec: oil,
                theoretical_consumption: consumption,
            },
            photo.as_deref(),
            quiet,
        ),
        VehicleAction::Show { name, format } => show(store, &name, format, output, opts),
        VehicleAction::Remove { name } => remove(store, &name, quiet),
    }
}

fn list(
    store: &Store,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let mut registry = store.load_registry()?;

    // Vehicles only present in the record tables still get listed.
    let maintenance = store.load_maintenance()?;
    if adopt_orphans(&mut registry, &maintenance) > 0 {
        store.save_registry(&registry)?;
    }

    let content = match format {
        OutputFormat::Json => opts.as_json(&registry)?,
        OutputFormat::Csv => {
            let mut out = String::new();
            if !opts.no_header {
                out.push_str("name,make,model,plate,engine\n");
            }
            for (name, p) in &registry {
                out.push_str(&format!(
                    "{},{},{},{},{}\n",
                    name, p.make, p.model, p.plate, p.engine
                ));
            }
            out
        }
        OutputFormat::Text => format_vehicles_text(&registry, opts),
    };
    write_output(output, &content)
}

fn add(
    store: &Store,
    name: &str,
    profile: VehicleProfile,
    photo: Option<&std::path::Path>,
    quiet: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Vehicle name must not be empty");
    }

    let mut registry = store.load_registry()?;
    if registry.contains_key(name) {
        bail!("Vehicle '{}' already exists", name);
    }
    registry.insert(name.to_string(), profile);
    store.save_registry(&registry)?;

    if let Some(photo) = photo {
        if !photo.exists() {
            bail!("Photo file not found: {}", photo.display());
        }
        store
            .add_photo(name, photo)
            .with_context(|| format!("Failed to store photo for '{}'", name))?;
    }

    if !quiet {
        println!("Added vehicle '{}'", name);
    }
    Ok(())
}

fn show(
    store: &Store,
    name: &str,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let registry = store.load_registry()?;
    let Some(profile) = registry.get(name) else {
        bail!("Unknown vehicle '{}'. Run 'carnet vehicle list' to see the registry.", name);
    };

    let maintenance: Vec<_> = store
        .load_maintenance()?
        .into_iter()
        .filter(|r| r.vehicle == name)
        .collect();
    let fuel: Vec<_> = store
        .load_fuel()?
        .into_iter()
        .filter(|r| r.vehicle == name)
        .collect();

    let derived = VehicleMetrics {
        current_mileage: metrics::current_mileage(&maintenance),
        total_cost: metrics::total_cost(&maintenance),
        average_consumption: metrics::average_consumption(&fuel),
    };
    let photo = store.find_photo(name);

    let content = match format {
        OutputFormat::Json => opts.as_json(&serde_json::json!({
            "name": name,
            "profile": profile,
            "metrics": derived,
            "photo": photo,
        }))?,
        _ => format_vehicle_show_text(name, profile, &derived, photo.as_deref(), opts),
    };
    write_output(output, &content)
}

fn remove(store: &Store, name: &str, quiet: bool) -> Result<()> {
    let removed = store.remove_vehicle(name)?;
    if !removed.profile && removed.maintenance == 0 && removed.fuel == 0 {
        if !quiet {
            println!("Nothing stored for '{}'", name);
        }
        return Ok(());
    }
    if !quiet {
        println!(
            "Removed '{}' ({} maintenance entries, {} fill-ups)",
            name, removed.maintenance, removed.fuel
        );
    }
    Ok(())
}
