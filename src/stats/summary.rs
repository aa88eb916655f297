//! Headline numbers for the dashboard's hero cards.

use crate::stats::mean;
use crate::stats::monthly::MonthlySummary;
use crate::stats::normals::DayOfYearSeries;
use crate::types::month_day::MonthDay;
use crate::types::observation::DailySeries;
use crate::types::unit::TemperatureUnit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestDay {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayExtreme {
    pub date: NaiveDate,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Most recent day with both a high and a low.
    pub latest: Option<LatestDay>,
    pub ytd_avg_high: Option<f64>,
    pub ytd_avg_low: Option<f64>,
    /// Average of the daily normals over the same days that have an observed high.
    pub ytd_normal_avg_high: Option<f64>,
    pub ytd_normal_avg_low: Option<f64>,
    pub hottest_day: Option<DayExtreme>,
    pub coldest_day: Option<DayExtreme>,
    /// Days whose high stayed below the freezing point.
    pub days_below_freezing: usize,
    /// Days whose low reached the freezing point.
    pub frost_days: usize,
    pub hot_days: usize,
    pub new_record_highs: usize,
    pub new_record_lows: usize,
}

pub fn summarize(
    current: &DailySeries,
    normals: &DayOfYearSeries,
    monthly: &[MonthlySummary],
    unit: TemperatureUnit,
) -> Summary {
    let freezing = unit.freezing_point();
    let hot = unit.hot_threshold();

    let mut highs = Vec::with_capacity(current.len());
    let mut lows = Vec::with_capacity(current.len());
    let mut normal_highs = Vec::new();
    let mut normal_lows = Vec::new();
    let mut summary = Summary::default();

    for observation in current {
        let normal = normals.get(MonthDay::from(observation.date));
        if let Some(high) = observation.high {
            highs.push(high);
            if let Some((normal_high, _)) = normal {
                normal_highs.push(normal_high);
            }
            if summary.hottest_day.map_or(true, |d| high > d.temp) {
                summary.hottest_day = Some(DayExtreme {
                    date: observation.date,
                    temp: high,
                });
            }
            if high < freezing {
                summary.days_below_freezing += 1;
            }
            if high >= hot {
                summary.hot_days += 1;
            }
        }
        if let Some(low) = observation.low {
            lows.push(low);
            if let Some((_, normal_low)) = normal {
                normal_lows.push(normal_low);
            }
            if summary.coldest_day.map_or(true, |d| low < d.temp) {
                summary.coldest_day = Some(DayExtreme {
                    date: observation.date,
                    temp: low,
                });
            }
            if low <= freezing {
                summary.frost_days += 1;
            }
        }
    }

    summary.latest = current
        .iter()
        .rev()
        .find_map(|o| o.complete().map(|(high, low)| LatestDay { date: o.date, high, low }));
    summary.ytd_avg_high = mean(&highs);
    summary.ytd_avg_low = mean(&lows);
    summary.ytd_normal_avg_high = mean(&normal_highs);
    summary.ytd_normal_avg_low = mean(&normal_lows);
    summary.new_record_highs = monthly.iter().map(|m| m.new_record_highs.len()).sum();
    summary.new_record_lows = monthly.iter().map(|m| m.new_record_lows.len()).sum();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::*;
    use crate::types::period::YearToDate;
    use chrono::Datelike;

    fn no_normals() -> DayOfYearSeries {
        DayOfYearSeries::default()
    }

    #[test]
    fn test_january_above_freezing_has_no_days_below_freezing() {
        let current = series_over(YearToDate(date(2026, 1, 31)), |d| {
            (Some(33.0 + d.day() as f64), Some(15.0))
        });
        let summary = summarize(&current, &no_normals(), &[], TemperatureUnit::Fahrenheit);
        assert_eq!(summary.days_below_freezing, 0);
        // every night still dropped below freezing
        assert_eq!(summary.frost_days, 31);
        assert_eq!(summary.hot_days, 0);
    }

    #[test]
    fn test_extremes_latest_and_counts() {
        let current = series_over(YearToDate(date(2026, 7, 10)), |d| {
            if d == date(2026, 7, 10) {
                (None, None)
            } else if d == date(2026, 7, 9) {
                (Some(101.0), Some(68.0))
            } else if d == date(2026, 1, 20) {
                (Some(12.0), Some(-8.0))
            } else {
                (Some(70.0), Some(40.0))
            }
        });
        let summary = summarize(&current, &no_normals(), &[], TemperatureUnit::Fahrenheit);
        assert_eq!(
            summary.latest,
            Some(LatestDay { date: date(2026, 7, 9), high: 101.0, low: 68.0 })
        );
        assert_eq!(summary.hottest_day, Some(DayExtreme { date: date(2026, 7, 9), temp: 101.0 }));
        assert_eq!(summary.coldest_day, Some(DayExtreme { date: date(2026, 1, 20), temp: -8.0 }));
        assert_eq!(summary.days_below_freezing, 1);
        assert_eq!(summary.frost_days, 1);
        assert_eq!(summary.hot_days, 1);
        assert_eq!(summary.ytd_normal_avg_high, None);
    }

    #[test]
    fn test_ytd_normal_average_matches_observed_days() {
        let current = series_over(YearToDate(date(2026, 1, 3)), |d| {
            if d.day() == 3 {
                (None, None)
            } else {
                (Some(50.0), Some(20.0))
            }
        });
        let normals = DayOfYearSeries {
            dates: vec![
                MonthDay::new(1, 1).unwrap(),
                MonthDay::new(1, 2).unwrap(),
                MonthDay::new(1, 3).unwrap(),
            ],
            high: vec![40.0, 44.0, 90.0],
            low: vec![10.0, 12.0, 90.0],
        };
        let summary = summarize(&current, &normals, &[], TemperatureUnit::Fahrenheit);
        assert_eq!(summary.ytd_avg_high, Some(50.0));
        assert_eq!(summary.ytd_normal_avg_high, Some(42.0));
        assert_eq!(summary.ytd_normal_avg_low, Some(11.0));
    }

    #[test]
    fn test_celsius_thresholds() {
        let current = series_over(YearToDate(date(2026, 1, 2)), |d| {
            if d.day() == 1 {
                (Some(-1.0), Some(-6.0))
            } else {
                (Some(33.0), Some(0.5))
            }
        });
        let summary = summarize(&current, &no_normals(), &[], TemperatureUnit::Celsius);
        assert_eq!(summary.days_below_freezing, 1);
        assert_eq!(summary.frost_days, 1);
        assert_eq!(summary.hot_days, 1);
    }
}
