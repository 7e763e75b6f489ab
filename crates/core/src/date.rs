//! German date normalization.
//!
//! The traffic page stamps each report with text like
//! `21. September 2025, 15:35 Uhr`. [`normalize_german_datetime`] turns that
//! into `2025-09-21T15:35`, a naive wall-clock timestamp whose lexicographic
//! order matches chronological order.

use std::sync::LazyLock;

use regex::Regex;
use time::macros::format_description;
use time::{Date, Month, PrimitiveDateTime, Time};

/// `<day>. <Month> <year>, <hour>:<minute>`, anchored at the start. Anything
/// after the minutes (usually ` Uhr`) is ignored.
static RE_GERMAN_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})\.\s*([A-Za-zäöüÄÖÜ]+)\s+([0-9]{4}),\s*([0-9]{1,2}):([0-9]{2})")
        .expect("invalid regex: german datetime")
});

/// Month names after lowercasing and umlaut transliteration.
/// Umlaut spellings are kept so the table is usable on raw lowercase input too.
const GERMAN_MONTHS: &[(&str, u8)] = &[
    ("januar", 1),
    ("februar", 2),
    ("maerz", 3),
    ("märz", 3),
    ("april", 4),
    ("mai", 5),
    ("juni", 6),
    ("juli", 7),
    ("august", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("dezember", 12),
];

/// Resolve a German month name to its number (1-12).
///
/// Case-insensitive; `ä`, `ö` and `ü` are folded to `ae`, `oe` and `ue`
/// before the lookup.
pub fn german_month(name: &str) -> Option<u8> {
    let folded = name
        .to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue");

    GERMAN_MONTHS
        .iter()
        .find(|(month, _)| *month == folded)
        .map(|(_, number)| *number)
}

/// Normalize a German date/time expression to `YYYY-MM-DDTHH:MM`.
///
/// Returns `None` when the text does not match the expected grammar, names an
/// unknown month, or describes an impossible date or clock time. No timezone
/// conversion takes place.
///
/// # Example
///
/// ```rust
/// use verkehr_core::normalize_german_datetime;
///
/// assert_eq!(
///     normalize_german_datetime("21. September 2025, 15:35 Uhr").as_deref(),
///     Some("2025-09-21T15:35")
/// );
/// assert_eq!(normalize_german_datetime("31. April 2025, 10:00"), None);
/// ```
pub fn normalize_german_datetime(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let Some(caps) = RE_GERMAN_DATETIME.captures(text) else {
        tracing::trace!(text, "date text does not match the expected grammar");
        return None;
    };

    let day: u8 = caps[1].parse().ok()?;
    let Some(month) = german_month(&caps[2]) else {
        tracing::trace!(month = &caps[2], "unknown german month name");
        return None;
    };
    let year: i32 = caps[3].parse().ok()?;
    let hour: u8 = caps[4].parse().ok()?;
    let minute: u8 = caps[5].parse().ok()?;

    let month = Month::try_from(month).ok()?;
    let date = Date::from_calendar_date(year, month, day).ok()?;
    let time = Time::from_hms(hour, minute, 0).ok()?;

    PrimitiveDateTime::new(date, time)
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))
        .ok()
}
