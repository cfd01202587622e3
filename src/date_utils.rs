use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Snapshot timestamp format: local time, second precision. Lexicographic
/// order on this format matches chronological order, which is what the
/// store's range comparison relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report date inputs use the day-first form, e.g. `01/01/2024`.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a user-supplied `dd/mm/yyyy` date, surfacing `InvalidDateFormat`
/// before anything touches the store.
pub fn parse_report_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), REPORT_DATE_FORMAT)
        .map_err(|_| AppError::InvalidDateFormat(input.to_string()))
}

/// An inclusive date range for report queries. Both end dates are included:
/// the range covers from midnight on `start` through the last second of
/// `end`.
#[derive(Debug, Clone, Copy)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRange {
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Ok(Self {
            start: parse_report_date(start)?,
            end: parse_report_date(end)?,
        })
    }

    /// First instant of the range, as a stored-timestamp string.
    pub fn start_bound(&self) -> String {
        format!("{} 00:00:00", self.start.format("%Y-%m-%d"))
    }

    /// Last instant of the range, as a stored-timestamp string.
    pub fn end_bound(&self) -> String {
        format!("{} 23:59:59", self.end.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first_dates() {
        let date = parse_report_date("31/01/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn rejects_other_formats() {
        for input in ["2024-01-31", "01-31-2024", "31/13/2024", "yesterday", ""] {
            let err = parse_report_date(input).unwrap_err();
            assert!(matches!(err, AppError::InvalidDateFormat(_)), "{input:?}");
        }
    }

    #[test]
    fn range_bounds_cover_whole_days() {
        let range = ReportRange::parse("01/01/2024", "31/01/2024").unwrap();
        assert_eq!(range.start_bound(), "2024-01-01 00:00:00");
        assert_eq!(range.end_bound(), "2024-01-31 23:59:59");
    }

    #[test]
    fn bounds_sort_lexicographically_like_timestamps() {
        let range = ReportRange::parse("05/02/2024", "05/02/2024").unwrap();
        let inside = "2024-02-05 14:30:00";
        assert!(range.start_bound().as_str() <= inside);
        assert!(inside <= range.end_bound().as_str());
    }
}
