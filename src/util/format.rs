//! Display and diagnostics formatting.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;
use time::macros::format_description;

/// First `max_chars` characters of `body`, with an ellipsis when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits.
pub fn truncate_chars(body: &str, max_chars: usize) -> String {
    let mut chars = body.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_owned(),
    }
}

/// Format an ISO-8601 timestamp (`2024-05-01T12:30:00.123456`) as
/// `01.05.2024`. Returns the input unchanged if it has no parseable date.
pub fn format_account_date(iso: &str) -> String {
    let Some(day) = iso.get(..10) else {
        return iso.to_owned();
    };
    match Date::parse(day, format_description!("[year]-[month]-[day]"))
        .map_err(time::Error::from)
        .and_then(|date| Ok(date.format(format_description!("[day].[month].[year]"))?))
    {
        Ok(formatted) => formatted,
        Err(e) => {
            log::debug!("format: `{iso}` is not a date: {e}");
            iso.to_owned()
        }
    }
}
