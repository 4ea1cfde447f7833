//! Oil-change status command.

use std::path::PathBuf;

use anyhow::Result;

use carnet_core::{AlertConfig, AlertEvaluator, metrics};
use carnet_store::Store;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::format::{FormatOptions, format_status_text};
use crate::util::write_output;

/// Build the alert evaluator, honoring a configured service term.
pub fn evaluator_from_config(config: &Config) -> AlertEvaluator {
    let mut alert_config = AlertConfig::default();
    if let Some(term) = &config.service_term {
        alert_config.service_term = term.clone();
    }
    AlertEvaluator::new(alert_config)
}

pub fn cmd_status(
    store: &Store,
    vehicle: &str,
    format: OutputFormat,
    config: &Config,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let records: Vec<_> = store
        .load_maintenance()?
        .into_iter()
        .filter(|r| r.vehicle == vehicle)
        .collect();

    let current_mileage = metrics::current_mileage(&records);
    let status = evaluator_from_config(config).evaluate(current_mileage, &records);

    let content = match format {
        OutputFormat::Json => opts.as_json(&serde_json::json!({
            "vehicle": vehicle,
            "current_mileage": current_mileage,
            "status": status,
        }))?,
        _ => format_status_text(vehicle, current_mileage, &status, opts),
    };
    write_output(output, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_uses_configured_term() {
        let config = Config {
            service_term: Some("vidange".to_string()),
            ..Default::default()
        };
        assert_eq!(evaluator_from_config(&config).config().service_term, "vidange");
    }

    #[test]
    fn test_evaluator_defaults_without_config() {
        let evaluator = evaluator_from_config(&Config::default());
        assert_eq!(evaluator.config().service_term, "oil change");
        assert_eq!(evaluator.config().overdue_km, 15_000);
    }
}
