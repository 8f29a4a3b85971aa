//! Date range and hour iteration.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::DateRangeError;

/// An inclusive range of UTC dates to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or start > end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| DateRangeError::InvalidDate(s.to_string()))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// Creates the range covering a whole calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside chrono's supported range.
    pub fn year(year: i32) -> Result<Self, DateRangeError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DateRangeError::InvalidYear(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DateRangeError::InvalidYear(year))?;
        Self::new(start, end)
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns an iterator over every hour from start 00:00 to end 23:00.
    pub fn hours(&self) -> HourIterator {
        HourIterator::new(self.start, self.end)
    }

    /// Returns the total number of hours in the range.
    #[must_use]
    pub fn total_hours(&self) -> usize {
        self.total_days() * 24
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Iterator over all hours in a date range.
#[derive(Debug, Clone)]
pub struct HourIterator {
    current: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl HourIterator {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let midnight = |date: NaiveDate| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        Self {
            current: midnight(start),
            // Last hour of the end date
            end: midnight(end) + TimeDelta::hours(23),
        }
    }
}

impl Iterator for HourIterator {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            return None;
        }

        let result = self.current;
        self.current += TimeDelta::hours(1);
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current > self.end {
            return (0, Some(0));
        }
        let hours = (self.end - self.current).num_hours() as usize + 1;
        (hours, Some(hours))
    }
}

impl ExactSizeIterator for HourIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_date_range_invalid() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(DateRangeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("2022-01-01", "2023-12-31").unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(range.total_days(), 730);

        assert!(matches!(
            DateRange::parse("2022-13-01", "2023-01-01"),
            Err(DateRangeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_year() {
        let range = DateRange::year(2012).unwrap();
        assert_eq!(range.total_days(), 366);
        assert_eq!(range.end.month(), 12);
        assert_eq!(range.end.day(), 31);
    }

    #[test]
    fn test_hour_iterator_covers_end_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let range = DateRange::new(start, end).unwrap();
        let hours: Vec<_> = range.hours().collect();

        assert_eq!(hours.len(), range.total_hours());
        assert_eq!(range.hours().len(), 48);
        assert_eq!(hours[0].hour(), 0);
        assert_eq!(hours[47].day(), 2);
        assert_eq!(hours[47].hour(), 23);
    }
}
