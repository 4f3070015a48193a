//! Formatting helpers for presenting field values.

use time::{macros::format_description, Date, OffsetDateTime, PrimitiveDateTime};

pub fn format_currency(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// `2024-03-07` or `2024-03-07 14:30:00` -> `Mar 7, 2024`. Unparseable input is
/// returned unchanged.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .and_then(|date| {
            date.format(&format_description!(
                "[month repr:short] [day padding:none], [year]"
            ))
            .ok()
        })
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, &format_description!("[year]-[month]-[day]")) {
        return Some(date);
    }
    if let Ok(stamp) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(stamp.date());
    }
    OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
        .ok()
        .map(|stamp| stamp.date())
}
