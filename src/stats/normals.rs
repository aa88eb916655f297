use crate::stats::{mean, Samples};
use crate::types::month_day::MonthDay;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean high and low per calendar day, in calendar order.
///
/// Used both for the 30-year normals and the shorter trailing average. Days
/// without any samples are left out rather than filled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayOfYearSeries {
    pub dates: Vec<MonthDay>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
}

impl DayOfYearSeries {
    pub fn from_samples(samples: &BTreeMap<MonthDay, Samples>) -> Self {
        let mut series = DayOfYearSeries::default();
        for (day, day_samples) in samples {
            if let (Some(high), Some(low)) = (mean(&day_samples.highs), mean(&day_samples.lows)) {
                series.dates.push(*day);
                series.high.push(high);
                series.low.push(low);
            }
        }
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `(high, low)` for `day`, if the series has it.
    pub fn get(&self, day: MonthDay) -> Option<(f64, f64)> {
        let index = self.dates.binary_search(&day).ok()?;
        Some((self.high[index], self.low[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::samples_by_day;
    use crate::stats::test_support::*;
    use crate::types::period::HistoryWindow;
    use chrono::Datelike;

    #[test]
    fn test_normals_are_means_per_day() {
        // highs 60, 62, 64 on every day across three years
        let series = series_over(HistoryWindow::new(2021, 2023), |d| {
            let offset = (d.year() - 2021) as f64 * 2.0;
            (Some(60.0 + offset), Some(30.0 - offset))
        });
        let normals = DayOfYearSeries::from_samples(&samples_by_day(&series, |_| true));
        assert_eq!(normals.len(), 365);
        assert_eq!(normals.get(MonthDay::new(7, 4).unwrap()), Some((62.0, 28.0)));
        assert_eq!(normals.get(MonthDay::new(2, 29).unwrap()), None);
    }

    #[test]
    fn test_trailing_window_only_uses_its_years() {
        let window = HistoryWindow::new(2016, 2025);
        let series = series_over(window, |d| (Some(d.year() as f64), Some(0.0)));
        let trailing = window.trailing(2);
        let samples = samples_by_day(&series, |d| trailing.contains(d.year()));
        let average = DayOfYearSeries::from_samples(&samples);
        assert_eq!(average.get(MonthDay::new(1, 1).unwrap()), Some((2024.5, 0.0)));
    }

    #[test]
    fn test_dates_are_in_calendar_order() {
        let series = series_over(HistoryWindow::new(2020, 2020), |_| (Some(1.0), Some(0.0)));
        let normals = DayOfYearSeries::from_samples(&samples_by_day(&series, |_| true));
        assert_eq!(normals.len(), 366);
        assert!(normals.dates.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(normals.dates[59].to_string(), "02-29");
    }
}
