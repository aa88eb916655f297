use crate::stats::monthly::MonthlySummary;
use crate::stats::normals::DayOfYearSeries;
use crate::types::month_day::MonthDay;
use crate::types::observation::DailySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Observed minus normal for each current-year day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyDepartures {
    pub dates: Vec<NaiveDate>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Anomalies {
    /// Three-letter names of the months that have a departure.
    pub months: Vec<String>,
    pub high_departure: Vec<f64>,
    pub low_departure: Vec<f64>,
    pub daily: DailyDepartures,
}

pub fn anomalies(
    monthly: &[MonthlySummary],
    current: &DailySeries,
    normals: &DayOfYearSeries,
) -> Anomalies {
    let mut result = Anomalies::default();
    for row in monthly {
        if let (Some(high), Some(low)) = (row.departure_high, row.departure_low) {
            result.months.push(row.name.chars().take(3).collect());
            result.high_departure.push(high);
            result.low_departure.push(low);
        }
    }
    for observation in current {
        let normal = normals.get(MonthDay::from(observation.date));
        result.daily.dates.push(observation.date);
        result
            .daily
            .high
            .push(observation.high.zip(normal).map(|(h, (n, _))| h - n));
        result
            .daily
            .low
            .push(observation.low.zip(normal).map(|(l, (_, n))| l - n));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::envelope::day_records;
    use crate::stats::monthly::monthly_summaries;
    use crate::stats::samples_by_day;
    use crate::stats::test_support::*;
    use crate::types::period::{HistoryWindow, YearToDate};

    #[test]
    fn test_anomalies_only_for_months_with_data() {
        let history = series_over(HistoryWindow::new(2020, 2025), |_| (Some(50.0), Some(20.0)));
        let current = series_over(YearToDate(date(2026, 2, 3)), |_| (Some(53.5), Some(18.0)));
        let samples = samples_by_day(&history, |_| true);
        let normals = DayOfYearSeries::from_samples(&samples);
        let monthly = monthly_summaries(&history, &current, &day_records(&samples));

        let result = anomalies(&monthly, &current, &normals);
        assert_eq!(result.months, ["Jan", "Feb"]);
        assert_eq!(result.high_departure, [3.5, 3.5]);
        assert_eq!(result.low_departure, [-2.0, -2.0]);
        assert_eq!(result.daily.dates.len(), current.len());
        assert!(result.daily.high.iter().all(|d| *d == Some(3.5)));
    }
}
