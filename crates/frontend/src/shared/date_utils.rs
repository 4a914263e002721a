//! Date and timestamp formatting for tables and forms.
//!
//! The API sends naive ISO timestamps (`2024-03-15T14:02:26.123456`) and
//! plain dates (`2024-03-15`).

use chrono::NaiveDate;

pub const EMPTY: &str = "—";

/// "2024-03-15T14:02:26.123456" -> "2024-03-15 14:02"
pub fn format_timestamp(value: &str) -> String {
    let Some((date_part, time_part)) = value.split_once('T') else {
        return if value.is_empty() {
            EMPTY.to_string()
        } else {
            value.to_string()
        };
    };
    let hh_mm: String = time_part.chars().take(5).collect();
    if hh_mm.len() == 5 && hh_mm.as_bytes()[2] == b':' {
        format!("{} {}", date_part, hh_mm)
    } else {
        date_part.to_string()
    }
}

/// `YYYY-MM-DD` as typed into a date input; blank means unset
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Value for `<input type="date">`
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
