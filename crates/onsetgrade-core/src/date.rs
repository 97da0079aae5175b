//! Calendar date parsing.
//!
//! Inputs carry either bare ISO dates (`2020-03-14`) or full timestamps.
//! Only the calendar date is ever kept; any time-of-day or offset is dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::EvalError;
use crate::model::CaseId;

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date or timestamp string and return its calendar date.
///
/// Returns `None` for anything that is not one of the supported layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Offsets are ignored: the local calendar date is what was observed.
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local().date())
}

/// Parse a ground-truth onset date. Failure aborts the run.
pub fn parse_ground_truth(case: &CaseId, raw: &str) -> Result<NaiveDate, EvalError> {
    parse_date(raw).ok_or_else(|| EvalError::InvalidGroundTruth {
        case: case.clone(),
        value: raw.to_string(),
    })
}

/// Days elapsed between the first and last timestamps of a series.
pub fn day_span(case: &CaseId, first: &str, last: &str) -> Result<u32, EvalError> {
    let bound = |raw: &str| {
        parse_date(raw).ok_or_else(|| EvalError::InvalidTimestamp {
            case: case.clone(),
            value: raw.to_string(),
        })
    };
    let first = bound(first)?;
    let last = bound(last)?;

    let days = last.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| EvalError::UnorderedSeries {
        case: case.clone(),
        first,
        last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_bare_dates() {
        assert_eq!(parse_date("2020-03-14"), Some(ymd(2020, 3, 14)));
        assert_eq!(parse_date("  2020-03-14 "), Some(ymd(2020, 3, 14)));
    }

    #[test]
    fn drops_time_of_day() {
        assert_eq!(parse_date("2020-03-14 23:59:59"), Some(ymd(2020, 3, 14)));
        assert_eq!(parse_date("2020-03-14T00:00:00.250"), Some(ymd(2020, 3, 14)));
        assert_eq!(parse_date("2020-03-14 08:30"), Some(ymd(2020, 3, 14)));
        assert_eq!(
            parse_date("2020-03-14T22:00:00-05:00"),
            Some(ymd(2020, 3, 14))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2020-02-30"), None);
        assert_eq!(parse_date("14/03/2020"), None);
    }

    #[test]
    fn day_span_uses_calendar_dates() {
        let case = CaseId::from("c");
        assert_eq!(
            day_span(&case, "2020-01-01 23:59:00", "2020-01-31 00:01:00").unwrap(),
            30
        );
        assert_eq!(day_span(&case, "2020-01-01", "2020-01-01").unwrap(), 0);
    }

    #[test]
    fn day_span_rejects_bad_bounds() {
        let case = CaseId::from("c");
        assert!(matches!(
            day_span(&case, "nope", "2020-01-31"),
            Err(EvalError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            day_span(&case, "2020-02-01", "2020-01-01"),
            Err(EvalError::UnorderedSeries { .. })
        ));
    }

    #[test]
    fn ground_truth_must_parse() {
        let case = CaseId::from("c");
        assert_eq!(
            parse_ground_truth(&case, "2020-03-14").unwrap(),
            ymd(2020, 3, 14)
        );
        assert!(parse_ground_truth(&case, "unknown").is_err());
    }
}
