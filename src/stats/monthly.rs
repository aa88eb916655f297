//! Per-month comparison of the current year against the history window.

use crate::stats::{mean, Samples};
use crate::types::month_day::MonthDay;
use crate::types::observation::DailySeries;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full English month name for `1..=12`, empty otherwise.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("")
}

/// An extreme value and the year it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    pub value: f64,
    pub year: i32,
}

/// A current-year day that beat the historical extreme for its calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordDay {
    pub date: NaiveDate,
    pub value: f64,
    pub previous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub name: String,
    /// Current-year days with a high, a low, or both.
    pub days_observed: usize,
    pub avg_high: Option<f64>,
    pub avg_low: Option<f64>,
    pub normal_high: Option<f64>,
    pub normal_low: Option<f64>,
    pub departure_high: Option<f64>,
    pub departure_low: Option<f64>,
    pub record_high: Option<RecordValue>,
    pub record_low: Option<RecordValue>,
    pub new_record_highs: Vec<RecordDay>,
    pub new_record_lows: Vec<RecordDay>,
}

#[derive(Default)]
struct MonthAccumulator {
    history: Samples,
    days_observed: usize,
    current_highs: Vec<f64>,
    current_lows: Vec<f64>,
    record_high: Option<RecordValue>,
    record_low: Option<RecordValue>,
    new_record_highs: Vec<RecordDay>,
    new_record_lows: Vec<RecordDay>,
}

impl MonthAccumulator {
    fn finish(self, month: u32) -> MonthlySummary {
        let normal_high = mean(&self.history.highs);
        let normal_low = mean(&self.history.lows);
        let avg_high = mean(&self.current_highs);
        let avg_low = mean(&self.current_lows);
        MonthlySummary {
            month,
            name: month_name(month).to_string(),
            days_observed: self.days_observed,
            avg_high,
            avg_low,
            normal_high,
            normal_low,
            departure_high: avg_high.zip(normal_high).map(|(a, n)| a - n),
            departure_low: avg_low.zip(normal_low).map(|(a, n)| a - n),
            record_high: self.record_high,
            record_low: self.record_low,
            new_record_highs: self.new_record_highs,
            new_record_lows: self.new_record_lows,
        }
    }
}

/// Builds the twelve monthly rows, January first.
///
/// Monthly normals average every complete historical day of the month. Monthly
/// records consider any reported value and keep the earliest year on ties. A
/// current-year day is a new record when it strictly beats `day_records` for
/// its calendar day.
pub fn monthly_summaries(
    history: &DailySeries,
    current: &DailySeries,
    day_records: &BTreeMap<MonthDay, (f64, f64)>,
) -> Vec<MonthlySummary> {
    let mut months: [MonthAccumulator; 12] = Default::default();

    for observation in history {
        let year = observation.date.year();
        let month = &mut months[observation.date.month0() as usize];
        if let Some((high, low)) = observation.complete() {
            month.history.push(high, low);
        }
        if let Some(high) = observation.high {
            if month.record_high.map_or(true, |r| high > r.value) {
                month.record_high = Some(RecordValue { value: high, year });
            }
        }
        if let Some(low) = observation.low {
            if month.record_low.map_or(true, |r| low < r.value) {
                month.record_low = Some(RecordValue { value: low, year });
            }
        }
    }

    for observation in current {
        let month = &mut months[observation.date.month0() as usize];
        if observation.high.is_some() || observation.low.is_some() {
            month.days_observed += 1;
        }
        month.current_highs.extend(observation.high);
        month.current_lows.extend(observation.low);
        let Some(&(record_high, record_low)) = day_records.get(&MonthDay::from(observation.date))
        else {
            continue;
        };
        if let Some(high) = observation.high.filter(|h| *h > record_high) {
            month.new_record_highs.push(RecordDay {
                date: observation.date,
                value: high,
                previous: record_high,
            });
        }
        if let Some(low) = observation.low.filter(|l| *l < record_low) {
            month.new_record_lows.push(RecordDay {
                date: observation.date,
                value: low,
                previous: record_low,
            });
        }
    }

    months
        .into_iter()
        .zip(1..=12)
        .map(|(accumulator, month)| accumulator.finish(month))
        .collect()
}
