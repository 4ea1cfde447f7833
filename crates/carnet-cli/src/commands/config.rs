//! Config command implementation.

use anyhow::{Context, Result, bail};

use crate::cli::{ConfigAction, ConfigKey};
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load();
            let content =
                toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if content.trim().is_empty() {
                println!("# empty configuration (defaults apply)");
            } else {
                print!("{}", content);
            }
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
            Ok(())
        }
        ConfigAction::Init => {
            let config = Config::load();
            config.save()?;
            if !quiet {
                println!("Wrote {}", Config::path().display());
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            match key {
                ConfigKey::DataDir => config.data_dir = Some(value.into()),
                ConfigKey::Format => {
                    if !matches!(value.as_str(), "text" | "json" | "csv") {
                        bail!("Invalid format '{}'. Valid values: text, json, csv", value);
                    }
                    config.format = Some(value);
                }
                ConfigKey::NoColor => {
                    config.no_color = match value.to_lowercase().as_str() {
                        "true" | "yes" | "on" | "1" => true,
                        "false" | "no" | "off" | "0" => false,
                        _ => bail!("Invalid boolean value '{}'. Use: true/false", value),
                    };
                }
                ConfigKey::ServiceTerm => config.service_term = Some(value),
            }
            config.save()?;
            if !quiet {
                println!("Updated {}", Config::path().display());
            }
            Ok(())
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            match key {
                ConfigKey::DataDir => config.data_dir = None,
                ConfigKey::Format => config.format = None,
                ConfigKey::NoColor => config.no_color = false,
                ConfigKey::ServiceTerm => config.service_term = None,
            }
            config.save()?;
            if !quiet {
                println!("Updated {}", Config::path().display());
            }
            Ok(())
        }
    }
}
