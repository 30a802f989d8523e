//! Free-text date entry.
//!
//! While the user types, only the canonical format is tried. On blur the
//! draft is resolved through a cascade: canonical format, then a set of
//! common unambiguous layouts, then today's date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Default canonical layout, `dd/MM/yyyy`.
pub const DEFAULT_FORMAT: &str = "%d/%m/%Y";

/// Layouts tried when the canonical format does not match on blur.
///
/// Slash-separated day-first input is deliberately absent: once the
/// canonical format has failed, `a/b/yyyy` is read month-first.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%a %b %d %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// How a draft was turned into a committed date on blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// The draft matched the canonical format.
    Strict(NaiveDate),
    /// The draft matched one of the fallback layouts.
    Fallback(NaiveDate),
    /// Nothing matched; today's date was substituted.
    Today(NaiveDate),
}

impl BlurOutcome {
    /// The date to commit.
    pub fn date(self) -> NaiveDate {
        match self {
            BlurOutcome::Strict(date) | BlurOutcome::Fallback(date) | BlurOutcome::Today(date) => {
                date
            }
        }
    }
}

/// Parse `text` exactly in `format`. Impossible dates such as the 31st of
/// February never parse.
pub fn parse_strict(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, format).ok()
}

/// Best-effort parse of common date spellings.
pub fn parse_lenient(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|timestamp| timestamp.date())
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}

/// Resolve a draft at the moment the field loses focus.
pub fn resolve_blur(text: &str, format: &str, today: NaiveDate) -> BlurOutcome {
    if let Some(date) = parse_strict(text, format) {
        BlurOutcome::Strict(date)
    } else if let Some(date) = parse_lenient(text) {
        BlurOutcome::Fallback(date)
    } else {
        BlurOutcome::Today(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn strict_accepts_canonical() {
        assert_eq!(parse_strict("05/03/2024", DEFAULT_FORMAT), Some(d(2024, 3, 5)));
        assert_eq!(parse_strict("29/02/2024", DEFAULT_FORMAT), Some(d(2024, 2, 29)));
    }

    #[test]
    fn strict_rejects_impossible_and_partial() {
        assert_eq!(parse_strict("31/02/2024", DEFAULT_FORMAT), None);
        assert_eq!(parse_strict("29/02/2023", DEFAULT_FORMAT), None);
        assert_eq!(parse_strict("05/03/", DEFAULT_FORMAT), None);
        assert_eq!(parse_strict("2024-03-05", DEFAULT_FORMAT), None);
    }

    #[test]
    fn lenient_reads_common_layouts() {
        assert_eq!(parse_lenient("2024-03-05"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient(" 2024/03/05 "), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("03/05/2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("Tue Mar 05 2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("March 5, 2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("5 March 2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("2024-03-05T23:10:00+02:00"), Some(d(2024, 3, 5)));
        assert_eq!(parse_lenient("2024-03-05 08:00:00"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn lenient_rejects_garbage() {
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("next tuesday"), None);
        assert_eq!(parse_lenient("31/02/2024"), None);
    }

    #[test]
    fn blur_cascade() {
        let today = d(2026, 10, 19);
        assert_eq!(
            resolve_blur("01/02/2024", DEFAULT_FORMAT, today),
            BlurOutcome::Strict(d(2024, 2, 1))
        );
        assert_eq!(
            resolve_blur("2024-02-01", DEFAULT_FORMAT, today),
            BlurOutcome::Fallback(d(2024, 2, 1))
        );
        assert_eq!(
            resolve_blur("31/02/2024", DEFAULT_FORMAT, today),
            BlurOutcome::Today(today)
        );
        assert_eq!(resolve_blur("", DEFAULT_FORMAT, today).date(), today);
    }
}
