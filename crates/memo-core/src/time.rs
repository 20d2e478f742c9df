//! Memo timestamps: local time in the fixed `DD.MM.YYYY hh:mm:ss` pattern.

use chrono::{Datelike, Local, NaiveDateTime};

use crate::error::{MemoError, Result};

/// `strftime` pattern for every `Modified` field.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Current local time as a memo timestamp.
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a memo timestamp. Every field must be zero-padded to full width.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let at = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        MemoError::Format {
            value: value.to_string(),
            source: Some(source),
        }
    })?;
    if at.format(TIMESTAMP_FORMAT).to_string() != value {
        return Err(MemoError::Format {
            value: value.to_string(),
            source: None,
        });
    }
    Ok(at)
}

/// `(YYYY, MM)` directory segments for a timestamp.
pub fn year_month(value: &str) -> Result<(String, String)> {
    let at = parse_timestamp(value)?;
    Ok((format!("{:04}", at.year()), format!("{:02}", at.month())))
}
