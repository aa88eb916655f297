//! Calendar day keys used to line up the same day across different years.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar day independent of year, written as `MM-DD`.
///
/// Ordering follows the calendar, so `02-29` sorts between `02-28` and `03-01`
/// and a `BTreeMap<MonthDay, _>` iterates in day-of-year order.
///
/// # Examples
///
/// ```
/// use tempdash::MonthDay;
///
/// let leap_day: MonthDay = "02-29".parse().unwrap();
/// assert_eq!(leap_day.month(), 2);
/// assert_eq!(leap_day.to_string(), "02-29");
/// assert!(leap_day < MonthDay::new(3, 1).unwrap());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay(u32, u32);

impl MonthDay {
    /// Returns `None` unless the day exists in a leap year.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self(month, day))
    }

    pub fn month(self) -> u32 {
        self.0
    }

    pub fn day(self) -> u32 {
        self.1
    }
}

impl From<NaiveDate> for MonthDay {
    fn from(date: NaiveDate) -> Self {
        Self(date.month(), date.day())
    }
}

impl Display for MonthDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a calendar day in MM-DD form")]
pub struct ParseMonthDayError(String);

impl FromStr for MonthDay {
    type Err = ParseMonthDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMonthDayError(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(err)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(err());
        }
        let month = month.parse().map_err(|_| err())?;
        let day = day.parse().map_err(|_| err())?;
        MonthDay::new(month, day).ok_or_else(err)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = ParseMonthDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_month_day_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(MonthDay::from(date), MonthDay::new(7, 4).unwrap());
        assert_eq!(MonthDay::from(date).to_string(), "07-04");
    }

    #[test]
    fn test_month_day_rejects_impossible_days() {
        assert!(MonthDay::new(2, 30).is_none());
        assert!(MonthDay::new(13, 1).is_none());
        assert!(MonthDay::new(4, 31).is_none());
        assert!("2-29".parse::<MonthDay>().is_err());
        assert!("02/29".parse::<MonthDay>().is_err());
        assert!("xx-01".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_month_day_calendar_order_places_leap_day() {
        let days: BTreeSet<MonthDay> = ["03-01", "02-29", "12-31", "01-01", "02-28"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let ordered: Vec<String> = days.into_iter().map(String::from).collect();
        assert_eq!(ordered, ["01-01", "02-28", "02-29", "03-01", "12-31"]);
    }

    #[test]
    fn test_month_day_serializes_as_string() {
        let md = MonthDay::new(1, 9).unwrap();
        assert_eq!(serde_json::to_string(&md).unwrap(), "\"01-09\"");
        let back: MonthDay = serde_json::from_str("\"01-09\"").unwrap();
        assert_eq!(back, md);
        assert!(serde_json::from_str::<MonthDay>("\"02-31\"").is_err());
    }
}
