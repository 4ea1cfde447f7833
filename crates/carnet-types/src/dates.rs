//! Calendar date parsing, formatting, and serde support.
//!
//! Dates are stored as `YYYY-MM-DD` in the tabular files and displayed as
//! `DD/MM/YYYY` everywhere a human reads them. Absent dates are a real
//! `Option::None`, never a sentinel string.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::{ParseError, ParseResult};

/// Storage format for dates in the CSV tables.
pub const STORAGE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Display format for dates shown to the user (tables, dossier).
pub const DISPLAY_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

/// Parse a `YYYY-MM-DD` date string.
pub fn parse(s: &str) -> ParseResult<Date> {
    Date::parse(s, STORAGE_FORMAT).map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Format a date as `DD/MM/YYYY`.
///
/// Formatting a valid calendar date with a day/month/year description cannot
/// fail, so this returns a plain String.
pub fn display(date: Date) -> String {
    date.format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format an optional date as `DD/MM/YYYY`, or a placeholder when absent.
pub fn display_or_placeholder(date: Option<Date>) -> String {
    match date {
        Some(d) => display(d),
        None => "-".to_string(),
    }
}

/// Serde module for `Date` fields stored as `YYYY-MM-DD`.
///
/// Usable as `#[serde(with = "carnet_types::dates::storage")]`; the nested
/// [`storage::option`] module covers `Option<Date>` fields, mapping an empty
/// CSV cell to `None`.
pub mod storage {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{Error as _, Serializer};
    use time::Date;

    use super::STORAGE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(STORAGE_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, STORAGE_FORMAT).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::de::{self, Deserializer};
        use serde::ser::Serializer;
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            struct OptionVisitor;

            impl<'de> de::Visitor<'de> for OptionVisitor {
                type Value = Option<Date>;

                fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str("an optional YYYY-MM-DD date")
                }

                fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                    Ok(None)
                }

                fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                    Ok(None)
                }

                fn visit_some<D2: Deserializer<'de>>(
                    self,
                    deserializer: D2,
                ) -> Result<Self::Value, D2::Error> {
                    super::deserialize(deserializer).map(Some)
                }
            }

            deserializer.deserialize_option(OptionVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        let d = parse("2024-03-15").unwrap();
        assert_eq!(d, date(2024, Month::March, 15));
    }

    #[test]
    fn test_parse_rejects_display_format() {
        assert!(parse("15/03/2024").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("not-a-date").unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_display_day_month_year() {
        assert_eq!(display(date(2024, Month::March, 5)), "05/03/2024");
    }

    #[test]
    fn test_display_or_placeholder() {
        assert_eq!(display_or_placeholder(None), "-");
        assert_eq!(
            display_or_placeholder(Some(date(2023, Month::December, 31))),
            "31/12/2023"
        );
    }
}
