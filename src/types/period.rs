//! Date ranges requested from the archive and the periods that resolve to them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Number of days in the range, both ends included.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

pub trait DatePeriod {
    fn get_date_period(self) -> Option<DateRange>;
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<DateRange> {
        DateRange::new(
            NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        )
    }
}

/// January 1st of the date's year through the date itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YearToDate(pub NaiveDate);

impl DatePeriod for YearToDate {
    fn get_date_period(self) -> Option<DateRange> {
        DateRange::new(NaiveDate::from_ymd_opt(self.0.year(), 1, 1)?, self.0)
    }
}

/// The span of complete years the normals are computed from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl HistoryWindow {
    pub const DEFAULT_YEARS: i32 = 30;
    /// First year the archive has reanalysis data for.
    pub const FIRST_ARCHIVE_YEAR: i32 = 1940;

    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    /// The `DEFAULT_YEARS` complete years before the year of `as_of`.
    pub fn preceding(as_of: NaiveDate) -> Self {
        let end_year = as_of.year() - 1;
        Self::new(end_year - Self::DEFAULT_YEARS + 1, end_year)
    }

    /// Number of years covered; zero or negative for an inverted window.
    pub fn num_years(&self) -> i64 {
        i64::from(self.end_year) - i64::from(self.start_year) + 1
    }

    pub fn years(&self) -> impl Iterator<Item = Year> {
        (self.start_year..=self.end_year).map(Year)
    }

    /// The last `count` years of the window.
    pub fn trailing(&self, count: u32) -> HistoryWindow {
        let count = i64::from(count).clamp(1, self.num_years().max(1));
        let start_year = i32::try_from(i64::from(self.end_year) - count + 1).unwrap_or(self.start_year);
        Self::new(start_year, self.end_year)
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

impl DatePeriod for HistoryWindow {
    fn get_date_period(self) -> Option<DateRange> {
        DateRange::new(
            Year(self.start_year).get_date_period()?.start,
            Year(self.end_year).get_date_period()?.end,
        )
    }
}

impl Display for HistoryWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Year(self.start_year), Year(self.end_year))
    }
}
