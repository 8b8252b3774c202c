use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_optional_date(value: Option<DateTime<Utc>>) -> String {
    value.map(format_date).unwrap_or_default()
}
