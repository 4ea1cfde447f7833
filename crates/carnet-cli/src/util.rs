//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use time::{Date, OffsetDateTime};

use carnet_types::dates;

/// Parse a `YYYY-MM-DD` date argument, defaulting to today when omitted.
pub fn parse_date_or_today(date: Option<&str>) -> Result<Date> {
    match date {
        Some(s) => dates::parse(s).with_context(|| format!("Invalid --date '{}'", s)),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

/// Write output to file or stdout
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_or_today_with_value() {
        let date = parse_date_or_today(Some("2024-05-01")).unwrap();
        assert_eq!(dates::display(date), "01/05/2024");
    }

    #[test]
    fn test_parse_date_or_today_rejects_garbage() {
        let err = parse_date_or_today(Some("01/05/2024")).unwrap_err();
        assert!(err.to_string().contains("Invalid --date"));
    }

    #[test]
    fn test_parse_date_or_today_defaults() {
        assert!(parse_date_or_today(None).is_ok());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(Some(&path), "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
