// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::debug;

/// Format all datetime values are normalized to before they enter a SQL predicate.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Declared comparison type of an orderable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Compared as text.
    Text,

    /// Compared as a number, integer or float.
    Numeric,

    /// Compared as a timestamp, normalized to UTC.
    Datetime,
}

/// A comparable value extracted from the reference entity a cursor points at.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparableValue {
    /// Text value.
    Text(String),

    /// Integer value.
    Integer(i64),

    /// Floating point value.
    Float(f64),

    /// Timestamp value in UTC.
    Datetime(DateTime<Utc>),
}

impl ComparableValue {
    /// Parses a raw attribute or meta string into a comparable value of the declared kind.
    ///
    /// Returns `None` for empty or malformed values, the regarding comparison gets dropped then
    /// instead of producing an always-false predicate.
    pub fn parse(raw: &str, kind: ValueKind) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match kind {
            ValueKind::Text => Some(ComparableValue::Text(raw.to_string())),
            ValueKind::Numeric => {
                if let Ok(value) = raw.parse::<i64>() {
                    return Some(ComparableValue::Integer(value));
                }

                match raw.parse::<f64>() {
                    Ok(value) => Some(ComparableValue::Float(value)),
                    Err(_) => {
                        debug!("Dropping comparison on unparsable numeric value '{}'", raw);
                        None
                    }
                }
            }
            ValueKind::Datetime => match parse_utc(raw) {
                Some(value) => Some(ComparableValue::Datetime(value)),
                None => {
                    debug!("Dropping comparison on unparsable datetime value '{}'", raw);
                    None
                }
            },
        }
    }

    /// Returns the declared comparison type of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ComparableValue::Text(_) => ValueKind::Text,
            ComparableValue::Integer(_) | ComparableValue::Float(_) => ValueKind::Numeric,
            ComparableValue::Datetime(_) => ValueKind::Datetime,
        }
    }

    /// Renders the value as an escaped SQL literal.
    ///
    /// Text values get their single quotes doubled, numeric values are rendered bare, datetime
    /// values are formatted in UTC as `YYYY-MM-DD HH:MM:SS` and quoted.
    pub fn sql_literal(&self) -> String {
        match self {
            ComparableValue::Text(value) => format!("'{}'", escape_sql_string(value)),
            ComparableValue::Integer(value) => value.to_string(),
            ComparableValue::Float(value) => value.to_string(),
            ComparableValue::Datetime(value) => {
                format!("'{}'", value.format(DATETIME_FORMAT))
            }
        }
    }
}

impl From<i64> for ComparableValue {
    fn from(value: i64) -> Self {
        ComparableValue::Integer(value)
    }
}

impl From<&str> for ComparableValue {
    fn from(value: &str) -> Self {
        ComparableValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for ComparableValue {
    fn from(value: DateTime<Utc>) -> Self {
        ComparableValue::Datetime(value)
    }
}

/// Escapes a string for use inside a single-quoted SQL literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Parses a raw timestamp string into UTC.
///
/// Accepts the storage format (`YYYY-MM-DD HH:MM:SS`, assumed to be UTC already since the stores
/// read the `_gmt` columns), a bare date and RFC 3339.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Some(DateTime::<Utc>::from_utc(naive, Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(DateTime::<Utc>::from_utc(date.and_hms(0, 0, 0), Utc));
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse_utc, ComparableValue, ValueKind};

    #[rstest]
    #[case::text("T-Shirt", ValueKind::Text, Some("'T-Shirt'".to_string()))]
    #[case::text_escaped("O'Brien", ValueKind::Text, Some("'O''Brien'".to_string()))]
    #[case::integer("42", ValueKind::Numeric, Some("42".to_string()))]
    #[case::float("19.99", ValueKind::Numeric, Some("19.99".to_string()))]
    #[case::datetime(
        "2024-01-05 13:37:00",
        ValueKind::Datetime,
        Some("'2024-01-05 13:37:00'".to_string())
    )]
    #[case::bare_date(
        "2024-01-05",
        ValueKind::Datetime,
        Some("'2024-01-05 00:00:00'".to_string())
    )]
    #[case::empty("", ValueKind::Text, None)]
    #[case::whitespace("   ", ValueKind::Numeric, None)]
    #[case::malformed_number("free", ValueKind::Numeric, None)]
    #[case::malformed_datetime("someday", ValueKind::Datetime, None)]
    fn parse_and_render(
        #[case] raw: &str,
        #[case] kind: ValueKind,
        #[case] expected: Option<String>,
    ) {
        let literal = ComparableValue::parse(raw, kind).map(|value| value.sql_literal());
        assert_eq!(literal, expected);
    }

    #[test]
    fn rfc_3339_timestamps_normalize_to_utc() {
        let value = parse_utc("2024-01-05T10:00:00+02:00").unwrap();
        assert_eq!(
            ComparableValue::Datetime(value).sql_literal(),
            "'2024-01-05 08:00:00'"
        );
    }

    #[test]
    fn value_kinds() {
        assert_eq!(ComparableValue::from(42).kind(), ValueKind::Numeric);
        assert_eq!(ComparableValue::from("test").kind(), ValueKind::Text);
        assert_eq!(ComparableValue::Float(1.5).kind(), ValueKind::Numeric);
    }
}
