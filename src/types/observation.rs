//! The fetched daily temperature series and its serialized column form.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::types::period::DateRange;

/// One day's high and low. Either may be missing when the archive has no value yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, high: Option<f64>, low: Option<f64>) -> Self {
        Self { date, high, low }
    }

    /// `(high, low)` when both values are present.
    pub fn complete(&self) -> Option<(f64, f64)> {
        Some((self.high?, self.low?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("expected {expected} after {previous}, found {found}")]
    NotConsecutive {
        previous: NaiveDate,
        expected: NaiveDate,
        found: NaiveDate,
    },
}

/// Observations for consecutive days with no gaps and no duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    observations: Vec<DailyObservation>,
}

impl DailySeries {
    /// Builds a series, rejecting anything that is not one observation per consecutive day.
    pub fn try_new(observations: Vec<DailyObservation>) -> Result<Self, SeriesError> {
        for pair in observations.windows(2) {
            let (previous, found) = (pair[0].date, pair[1].date);
            let expected = previous.succ_opt().unwrap_or(previous);
            if found != expected {
                return Err(SeriesError::NotConsecutive {
                    previous,
                    expected,
                    found,
                });
            }
        }
        Ok(Self { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyObservation> {
        self.observations.iter()
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.observations.first()?.date, self.observations.last()?.date)
    }

    /// Days that have both a high and a low.
    pub fn complete_days(&self) -> impl Iterator<Item = (NaiveDate, f64, f64)> + '_ {
        self.observations
            .iter()
            .filter_map(|o| o.complete().map(|(high, low)| (o.date, high, low)))
    }

    /// The part of the series inside `range`; still consecutive.
    pub fn restrict_to(&self, range: DateRange) -> DailySeries {
        DailySeries {
            observations: self
                .observations
                .iter()
                .filter(|o| range.contains(o.date))
                .copied()
                .collect(),
        }
    }

    /// Splits the series into one consecutive series per calendar year.
    pub fn split_by_year(&self) -> BTreeMap<i32, DailySeries> {
        let mut years: BTreeMap<i32, DailySeries> = BTreeMap::new();
        for observation in &self.observations {
            years
                .entry(observation.date.year())
                .or_default()
                .observations
                .push(*observation);
        }
        years
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a DailyObservation;
    type IntoIter = std::slice::Iter<'a, DailyObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Column layout of a series as the dashboard's charts consume it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesColumns {
    pub dates: Vec<NaiveDate>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
}

impl From<&DailySeries> for SeriesColumns {
    fn from(series: &DailySeries) -> Self {
        let mut columns = SeriesColumns {
            dates: Vec::with_capacity(series.len()),
            high: Vec::with_capacity(series.len()),
            low: Vec::with_capacity(series.len()),
        };
        for observation in series {
            columns.dates.push(observation.date);
            columns.high.push(observation.high);
            columns.low.push(observation.low);
        }
        columns
    }
}
