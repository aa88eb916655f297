//! Percentile bands and records of historical values per calendar day.

use crate::stats::Samples;
use crate::types::month_day::MonthDay;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Calendar days with fewer historical samples than this get no envelope entry.
pub const MIN_ENVELOPE_SAMPLES: usize = 5;

/// Percentile ranks stored in the envelope, lowest first.
pub const PERCENTILE_RANKS: [f64; 5] = [0.10, 0.25, 0.50, 0.75, 0.90];

/// Nearest-rank-below percentile of an ascending slice: `sorted[min(n - 1, floor(n * p))]`.
///
/// The index never decreases as `p` grows, so neither does the result.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let index = ((n as f64 * p).floor() as usize).min(n - 1);
    Some(sorted[index])
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    sorted
}

/// Ordered percentile values for one day, matching [`PERCENTILE_RANKS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands(pub [f64; 5]);

impl Bands {
    fn of(sorted: &[f64]) -> Option<Bands> {
        let mut bands = [0.0; 5];
        for (slot, rank) in bands.iter_mut().zip(PERCENTILE_RANKS) {
            *slot = percentile(sorted, rank)?;
        }
        Some(Bands(bands))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    pub dates: Vec<MonthDay>,
    pub p10_high: Vec<f64>,
    pub p25_high: Vec<f64>,
    pub p50_high: Vec<f64>,
    pub p75_high: Vec<f64>,
    pub p90_high: Vec<f64>,
    pub p10_low: Vec<f64>,
    pub p25_low: Vec<f64>,
    pub p50_low: Vec<f64>,
    pub p75_low: Vec<f64>,
    pub p90_low: Vec<f64>,
    pub record_high: Vec<f64>,
    pub record_low: Vec<f64>,
}

impl Envelope {
    pub fn from_samples(samples: &BTreeMap<MonthDay, Samples>) -> Self {
        let mut envelope = Envelope::default();
        for (day, day_samples) in samples {
            if day_samples.len() < MIN_ENVELOPE_SAMPLES {
                continue;
            }
            let highs = sorted(&day_samples.highs);
            let lows = sorted(&day_samples.lows);
            let (Some(high_bands), Some(low_bands)) = (Bands::of(&highs), Bands::of(&lows)) else {
                continue;
            };
            envelope.push(*day, high_bands, low_bands, highs[highs.len() - 1], lows[0]);
        }
        envelope
    }

    fn push(&mut self, day: MonthDay, high: Bands, low: Bands, record_high: f64, record_low: f64) {
        self.dates.push(day);
        let [h10, h25, h50, h75, h90] = high.0;
        self.p10_high.push(h10);
        self.p25_high.push(h25);
        self.p50_high.push(h50);
        self.p75_high.push(h75);
        self.p90_high.push(h90);
        let [l10, l25, l50, l75, l90] = low.0;
        self.p10_low.push(l10);
        self.p25_low.push(l25);
        self.p50_low.push(l50);
        self.p75_low.push(l75);
        self.p90_low.push(l90);
        self.record_high.push(record_high);
        self.record_low.push(record_low);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    fn index_of(&self, day: MonthDay) -> Option<usize> {
        self.dates.binary_search(&day).ok()
    }

    pub fn high_bands(&self, day: MonthDay) -> Option<Bands> {
        let i = self.index_of(day)?;
        Some(Bands([
            self.p10_high[i],
            self.p25_high[i],
            self.p50_high[i],
            self.p75_high[i],
            self.p90_high[i],
        ]))
    }

    pub fn low_bands(&self, day: MonthDay) -> Option<Bands> {
        let i = self.index_of(day)?;
        Some(Bands([
            self.p10_low[i],
            self.p25_low[i],
            self.p50_low[i],
            self.p75_low[i],
            self.p90_low[i],
        ]))
    }
}

/// Highest high and lowest low seen on each calendar day, regardless of sample count.
pub fn day_records(samples: &BTreeMap<MonthDay, Samples>) -> BTreeMap<MonthDay, (f64, f64)> {
    samples
        .iter()
        .filter_map(|(day, s)| {
            let high = s.highs.iter().copied().map(OrderedFloat).max()?;
            let low = s.lows.iter().copied().map(OrderedFloat).min()?;
            Some((*day, (high.0, low.0)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::samples_by_day;
    use crate::stats::test_support::*;
    use crate::types::period::HistoryWindow;
    use chrono::Datelike;

    #[test]
    fn test_percentile_uses_floor_index() {
        let values: Vec<f64> = (1..=30).map(f64::from).collect();
        assert_eq!(percentile(&values, 0.10), Some(4.0));
        assert_eq!(percentile(&values, 0.50), Some(16.0));
        assert_eq!(percentile(&values, 0.90), Some(28.0));
        assert_eq!(percentile(&values, 1.0), Some(30.0));
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_bands_are_non_decreasing() {
        // scrambled values so sorting matters
        let window = HistoryWindow::new(1996, 2025);
        let series = series_over(window, |d| {
            let scramble = ((d.year() * 7919 + d.ordinal() as i32 * 104729) % 61) as f64;
            (Some(40.0 + scramble), Some(10.0 + scramble / 2.0))
        });
        let envelope = Envelope::from_samples(&samples_by_day(&series, |_| true));
        assert_eq!(envelope.len(), 366);
        for day in &envelope.dates {
            for bands in [envelope.high_bands(*day), envelope.low_bands(*day)] {
                let Bands(values) = bands.unwrap();
                assert!(values.windows(2).all(|w| w[0] <= w[1]), "{day}: {values:?}");
            }
        }
        for i in 0..envelope.len() {
            assert!(envelope.record_high[i] >= envelope.p90_high[i]);
            assert!(envelope.record_low[i] <= envelope.p10_low[i]);
        }
    }

    #[test]
    fn test_days_with_few_samples_are_skipped() {
        // four years give at most four samples per day
        let series = series_over(HistoryWindow::new(2021, 2024), |_| (Some(50.0), Some(20.0)));
        let envelope = Envelope::from_samples(&samples_by_day(&series, |_| true));
        assert!(envelope.is_empty());

        let records = day_records(&samples_by_day(&series, |_| true));
        assert_eq!(records[&MonthDay::new(2, 29).unwrap()], (50.0, 20.0));
    }
}
