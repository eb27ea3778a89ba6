//! Free-text wait-time parsing
//!
//! Sources publish wait times as text such as `"2 hr 12 min"`,
//! `"1 hr 0 min to 1 hr 9 min"` or `"Not available"`. Parsing never fails; anything
//! unreadable becomes "unavailable".

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ParsedWaitTime;

/// Marker the sources use for a missing reading (matched case-insensitively)
pub const UNAVAILABLE_MARKER: &str = "not available";

lazy_static! {
    static ref HOURS_PATTERN: Regex = Regex::new(r"(\d+)\s*hr").unwrap();
    static ref MINUTES_PATTERN: Regex = Regex::new(r"(\d+)\s*min").unwrap();
    // Needs a space before "to" but not after: "2 hr 44 min to4 hr 25 min"
    static ref RANGE_SEPARATOR: Regex = Regex::new(r"\s+to\s*").unwrap();
}

/// Parse a raw wait-time description into minutes
///
/// * `None` or text containing "Not available" gives `None`.
/// * A range `A to B` gives the mean of both ends, or `None` if either end fails.
/// * Otherwise hours and minutes are summed; a zero total is treated as no signal.
#[must_use]
pub fn parse_wait_time(raw: Option<&str>) -> Option<f64> {
    let text = raw?.to_lowercase();
    if text.contains(UNAVAILABLE_MARKER) {
        return None;
    }

    let mut sides = RANGE_SEPARATOR.splitn(&text, 2);
    let first = sides.next()?;
    match sides.next() {
        Some(second) => {
            let low = extract_minutes(first)?;
            let high = extract_minutes(second)?;
            Some((f64::from(low) + f64::from(high)) / 2.0)
        }
        None => extract_minutes(first).map(f64::from),
    }
}

/// Parse into the record-level wrapper
#[must_use]
pub fn parse(raw: Option<&str>) -> ParsedWaitTime {
    ParsedWaitTime::new(parse_wait_time(raw))
}

/// Total minutes of a single duration, `None` when nothing (or zero) was found
fn extract_minutes(text: &str) -> Option<u32> {
    let hours = capture_count(&HOURS_PATTERN, text)?;
    let minutes = capture_count(&MINUTES_PATTERN, text)?;

    let total = hours.unwrap_or(0).checked_mul(60)?.checked_add(minutes.unwrap_or(0))?;
    (total > 0).then_some(total)
}

/// First integer captured by `pattern`
///
/// The outer `Option` is `None` when the digits do not fit a `u32`, which makes the
/// whole duration unreadable; the inner one is `None` when the unit is absent.
fn capture_count(pattern: &Regex, text: &str) -> Option<Option<u32>> {
    match pattern.captures(text) {
        Some(caps) => caps[1].parse::<u32>().ok().map(Some),
        None => Some(None),
    }
}
