use crate::error::ReportError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// How far back a report looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportWindow {
    /// Whole UTC days ending at today's midnight.
    TrailingDays(u32),
    /// The calendar month containing "now".
    Month,
}

#[derive(Debug, PartialEq)]
pub struct TimeRange {
    pub start: chrono::DateTime<Utc>,
    pub end: chrono::DateTime<Utc>,
}

impl TimeRange {
    pub fn for_window(window: ReportWindow, now: DateTime<Utc>) -> Result<Self, ReportError> {
        match window {
            ReportWindow::TrailingDays(days) => Self::trailing_days(now, days),
            ReportWindow::Month => Self::month_of(now),
        }
    }

    pub fn trailing_days(now: DateTime<Utc>, days: u32) -> Result<Self, ReportError> {
        if days == 0 {
            return Err(ReportError::EmptyTimeRange);
        }
        let midnight = now
            .naive_utc()
            .date()
            .and_hms_opt(0, 0, 0)
            .ok_or(ReportError::NoneValue)?;
        let end = Utc.from_utc_datetime(&midnight);
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or(ReportError::WindowOutOfRange(days))?;
        Ok(TimeRange { start, end })
    }

    pub fn month_of(now: DateTime<Utc>) -> Result<Self, ReportError> {
        let start = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(ReportError::NoneValue)?;
        let end = NaiveDate::from_ymd_opt(
            now.year(),
            now.month(),
            Self::last_day_of_month(now.year(), now.month())?,
        )
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .ok_or(ReportError::NoneValue)?;

        Ok(TimeRange {
            start: Utc.from_utc_datetime(&start),
            end: Utc.from_utc_datetime(&end),
        })
    }

    /// First and last covered date, e.g. `2024-06-01 ~ 2024-06-07`.
    pub fn label(&self) -> String {
        let last = self.end - Duration::seconds(1);
        format!(
            "{} ~ {}",
            self.start.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )
    }

    fn last_day_of_month(year: i32, month: u32) -> Result<u32, ReportError> {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1))
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map(|last| last.day())
            .ok_or(ReportError::NoneValue)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ReportError;
    use crate::time_range::{ReportWindow, TimeRange};
    use chrono::{DateTime, TimeZone, Utc};
    use std::str::FromStr;

    #[test]
    fn test_trailing_days() {
        let now = DateTime::<Utc>::from_str("2024-06-08T05:30:00.0+00:00").unwrap();

        let time_range = TimeRange::trailing_days(now, 7);
        assert_eq!(
            time_range.unwrap(),
            TimeRange {
                start: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_trailing_days_crosses_year() {
        let now = DateTime::<Utc>::from_str("2024-01-02T00:00:00.0+00:00").unwrap();

        let time_range = TimeRange::trailing_days(now, 3).unwrap();
        assert_eq!(time_range.start, Utc.with_ymd_and_hms(2023, 12, 30, 0, 0, 0).unwrap());
        assert_eq!(time_range.label(), "2023-12-30 ~ 2024-01-01");
    }

    #[test]
    fn test_trailing_zero_days() {
        let now = DateTime::<Utc>::from_str("2024-06-08T05:30:00.0+00:00").unwrap();
        assert_eq!(
            TimeRange::trailing_days(now, 0).err().unwrap(),
            ReportError::EmptyTimeRange
        );
    }

    #[test]
    fn test_trailing_days_beyond_calendar() {
        let now = DateTime::<Utc>::from_str("2024-06-08T05:30:00.0+00:00").unwrap();
        assert_eq!(
            TimeRange::for_window(ReportWindow::TrailingDays(u32::MAX), now)
                .err()
                .unwrap(),
            ReportError::WindowOutOfRange(u32::MAX)
        );
    }

    #[test]
    fn test_month_of() {
        let now = DateTime::<Utc>::from_str("2020-12-01T15:00:00.0+00:00").unwrap();

        let time_range = TimeRange::month_of(now);
        assert_eq!(
            time_range.unwrap(),
            TimeRange {
                start: Utc.with_ymd_and_hms(2020, 12, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap(),
            }
        );
    }

    #[test]
    fn test_month_of_leap_february() {
        let now = DateTime::<Utc>::from_str("2024-02-10T00:00:00.0+00:00").unwrap();

        let time_range = TimeRange::for_window(ReportWindow::Month, now).unwrap();
        assert_eq!(time_range.end, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());
        assert_eq!(time_range.label(), "2024-02-01 ~ 2024-02-29");
    }
}
