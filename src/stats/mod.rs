//! Aggregates derived from the fetched daily series.
//!
//! Everything here is a pure function of the history and current-year series,
//! so one fetch always yields one consistent set of aggregates.

pub mod anomalies;
pub mod envelope;
pub mod monthly;
pub mod normals;
pub mod summary;

use crate::types::month_day::MonthDay;
use crate::types::observation::DailySeries;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rounds to the archive's one-decimal precision.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Highs and lows collected for one grouping key, from days that have both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
}

impl Samples {
    fn push(&mut self, high: f64, low: f64) {
        self.highs.push(high);
        self.lows.push(low);
    }

    pub fn len(&self) -> usize {
        self.highs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highs.is_empty()
    }
}

/// Groups every complete day of `series` accepted by `include` by calendar day.
pub fn samples_by_day(
    series: &DailySeries,
    include: impl Fn(NaiveDate) -> bool,
) -> BTreeMap<MonthDay, Samples> {
    let mut grouped: BTreeMap<MonthDay, Samples> = BTreeMap::new();
    for (date, high, low) in series.complete_days().filter(|(d, _, _)| include(*d)) {
        grouped
            .entry(MonthDay::from(date))
            .or_default()
            .push(high, low);
    }
    grouped
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::observation::{DailyObservation, DailySeries};
    use crate::types::period::{DatePeriod, DateRange};
    use chrono::NaiveDate;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A series over `period` whose values come from `values(date)`.
    pub fn series_over(
        period: impl DatePeriod,
        values: impl Fn(NaiveDate) -> (Option<f64>, Option<f64>),
    ) -> DailySeries {
        let range: DateRange = period.get_date_period().unwrap();
        let observations = range
            .days()
            .map(|d| {
                let (high, low) = values(d);
                DailyObservation::new(d, high, low)
            })
            .collect();
        DailySeries::try_new(observations).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::types::period::{HistoryWindow, Year};
    use chrono::Datelike;

    #[test]
    fn test_round_tenth_and_mean() {
        assert_eq!(round_tenth(45.26), 45.3);
        assert_eq!(round_tenth(-3.04), -3.0);
        assert_eq!(mean(&[1.0, 2.0, 4.5]), Some(2.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_samples_by_day_groups_across_years() {
        let series = series_over(HistoryWindow::new(2019, 2021), |d| {
            (Some(d.year() as f64 - 1990.0), Some(0.0))
        });
        let grouped = samples_by_day(&series, |_| true);
        // 2020 is a leap year, so 02-29 has exactly one sample.
        assert_eq!(grouped.len(), 366);
        let jan_first = &grouped[&MonthDay::new(1, 1).unwrap()];
        assert_eq!(jan_first.highs, [29.0, 30.0, 31.0]);
        assert_eq!(grouped[&MonthDay::new(2, 29).unwrap()].len(), 1);

        let only_2021 = samples_by_day(&series, |d| d.year() == 2021);
        assert_eq!(only_2021[&MonthDay::new(1, 1).unwrap()].highs, [31.0]);
    }

    #[test]
    fn test_samples_by_day_skips_incomplete_days() {
        let series = series_over(Year(2023), |d| {
            if d.day() == 1 {
                (Some(50.0), None)
            } else {
                (Some(50.0), Some(30.0))
            }
        });
        let grouped = samples_by_day(&series, |_| true);
        assert!(!grouped.contains_key(&MonthDay::new(3, 1).unwrap()));
        assert_eq!(grouped.len(), 365 - 12);
    }
}
