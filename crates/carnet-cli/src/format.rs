//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;
use time::Date;

use carnet_core::OilChangeStatus;
use carnet_store::Registry;
use carnet_types::{FuelRecord, MaintenanceRecord, dates};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            no_header: false,
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Serialize value to pretty JSON.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }
}

fn build_table(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Date column content for CSV output (storage format, empty when absent).
fn csv_date(date: Option<Date>) -> String {
    date.and_then(|d| d.format(dates::STORAGE_FORMAT).ok())
        .unwrap_or_default()
}

// ============================================================================
// Maintenance formatting
// ============================================================================

#[must_use]
pub fn format_maintenance_text(rows: &[MaintenanceRecord], _opts: &FormatOptions) -> String {
    if rows.is_empty() {
        return "No maintenance entries.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Date", "Vehicle", "Km", "Description", "Cost", "Receipt"]);
    for row in rows {
        builder.push_record([
            dates::display_or_placeholder(row.date),
            row.vehicle.clone(),
            row.mileage.to_string(),
            row.description.clone(),
            row.cost.map(|c| format!("{c:.2}")).unwrap_or_default(),
            if row.attachment_path().is_some() {
                "yes".to_string()
            } else {
                String::new()
            },
        ]);
    }
    build_table(builder)
}

#[must_use]
pub fn format_maintenance_csv(rows: &[MaintenanceRecord], opts: &FormatOptions) -> String {
    let mut out = String::new();
    if !opts.no_header {
        out.push_str("date,vehicle,mileage,description,cost,attachment\n");
    }
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_date(row.date),
            csv_escape(&row.vehicle),
            row.mileage,
            csv_escape(&row.description),
            row.cost.map(|c| c.to_string()).unwrap_or_default(),
            csv_escape(
                &row.attachment_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            ),
        ));
    }
    out
}

// ============================================================================
// Fuel formatting
// ============================================================================

#[must_use]
pub fn format_fuel_text(rows: &[FuelRecord], _opts: &FormatOptions) -> String {
    if rows.is_empty() {
        return "No fill-ups.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Date", "Vehicle", "Km", "Liters", "Price", "L/100km"]);
    for row in rows {
        builder.push_record([
            dates::display_or_placeholder(row.date),
            row.vehicle.clone(),
            row.mileage.to_string(),
            format!("{:.2}", row.liters),
            format!("{:.2}", row.total_price),
            if row.consumption > 0.0 {
                format!("{:.2}", row.consumption)
            } else {
                "-".to_string()
            },
        ]);
    }
    build_table(builder)
}

#[must_use]
pub fn format_fuel_csv(rows: &[FuelRecord], opts: &FormatOptions) -> String {
    let mut out = String::new();
    if !opts.no_header {
        out.push_str("date,vehicle,mileage,liters,total_price,consumption\n");
    }
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_date(row.date),
            csv_escape(&row.vehicle),
            row.mileage,
            row.liters,
            row.total_price,
            row.consumption,
        ));
    }
    out
}

// ============================================================================
// Vehicle formatting
// ============================================================================

#[must_use]
pub fn format_vehicles_text(registry: &Registry, _opts: &FormatOptions) -> String {
    if registry.is_empty() {
        return "No vehicles registered.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Make", "Model", "Plate", "Engine"]);
    for (name, profile) in registry {
        builder.push_record([
            name.as_str(),
            profile.make.as_str(),
            profile.model.as_str(),
            profile.plate.as_str(),
            profile.engine.as_str(),
        ]);
    }
    build_table(builder)
}

/// Derived figures shown next to a vehicle profile.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct VehicleMetrics {
    pub current_mileage: u32,
    pub total_cost: f64,
    pub average_consumption: Option<f64>,
}

#[must_use]
pub fn format_vehicle_show_text(
    name: &str,
    profile: &carnet_types::VehicleProfile,
    metrics: &VehicleMetrics,
    photo: Option<&std::path::Path>,
    opts: &FormatOptions,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Property", "Value"]);
    builder.push_record(["Make", &profile.make]);
    builder.push_record(["Model", &profile.model]);
    builder.push_record(["Plate", &profile.plate]);
    builder.push_record(["Engine", &profile.engine]);
    builder.push_record(["Oil", &profile.oil_spec]);
    builder.push_record(["Rated consumption", &profile.theoretical_consumption]);
    builder.push_record(["Odometer", &format!("{} km", metrics.current_mileage)]);
    builder.push_record(["Total spent", &format!("{:.2} EUR", metrics.total_cost)]);
    builder.push_record([
        "Measured consumption",
        &metrics
            .average_consumption
            .map(|c| format!("{c:.1} L/100km"))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    builder.push_record([
        "Photo",
        &photo
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);

    let title = if opts.no_color {
        name.to_string()
    } else {
        format!("{}", name.bold())
    };
    format!("{}\n{}", title, build_table(builder))
}

// ============================================================================
// Status formatting
// ============================================================================

#[must_use]
pub fn format_status_text(
    vehicle: &str,
    current_mileage: u32,
    status: &OilChangeStatus,
    opts: &FormatOptions,
) -> String {
    let headline = status.headline();
    let headline = if opts.no_color {
        headline
    } else {
        match status {
            OilChangeStatus::Ok { .. } => format!("{}", headline.green()),
            OilChangeStatus::DueSoon { .. } => format!("{}", headline.yellow()),
            OilChangeStatus::Overdue { .. } => format!("{}", headline.red().bold()),
            OilChangeStatus::NoHistory => format!("{}", headline.cyan()),
        }
    };
    format!("{} ({} km): {}\n", vehicle, current_mileage, headline)
}

/// Escape a CSV field: quote when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
