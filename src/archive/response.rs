//! Wire format of the archive's daily endpoint and its conversion into a [`DailySeries`].

use crate::archive::error::MalformedResponse;
use crate::stats::round_tenth;
use crate::types::observation::{DailyObservation, DailySeries};
use crate::types::period::DateRange;
use crate::types::unit::TemperatureUnit;
use chrono::NaiveDate;
use serde::Deserialize;

pub(crate) const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub elevation: Option<f64>,
    #[serde(default)]
    pub daily_units: Option<DailyUnits>,
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyUnits {
    pub temperature_2m_max: Option<String>,
    pub temperature_2m_min: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
}

/// Body of a non-2xx reply, e.g. `{"error": true, "reason": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub reason: String,
}

/// A validated series plus the station metadata that came with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveSeries {
    pub elevation: Option<f64>,
    pub series: DailySeries,
}

impl ArchiveResponse {
    /// Checks the response covers exactly `range`, one entry per day, in `unit`.
    pub(crate) fn into_series(
        self,
        range: DateRange,
        unit: TemperatureUnit,
    ) -> Result<ArchiveSeries, MalformedResponse> {
        if let Some(units) = &self.daily_units {
            for reported in [&units.temperature_2m_max, &units.temperature_2m_min]
                .into_iter()
                .flatten()
            {
                if reported != unit.symbol() {
                    return Err(MalformedResponse::UnitMismatch {
                        expected: unit.symbol(),
                        found: reported.clone(),
                    });
                }
            }
        }

        let daily = self.daily.ok_or(MalformedResponse::MissingDaily)?;
        let expected = range.num_days();
        for (field, found) in [
            ("time", daily.time.len()),
            ("temperature_2m_max", daily.temperature_2m_max.len()),
            ("temperature_2m_min", daily.temperature_2m_min.len()),
        ] {
            if found != expected {
                return Err(MalformedResponse::LengthMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }

        let observations = daily
            .time
            .iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.temperature_2m_min)
            .map(|((time, high), low)| {
                let date = NaiveDate::parse_from_str(time, "%Y-%m-%d")
                    .map_err(|_| MalformedResponse::BadDate(time.clone()))?;
                Ok(DailyObservation::new(
                    date,
                    high.map(round_tenth),
                    low.map(round_tenth),
                ))
            })
            .collect::<Result<Vec<_>, MalformedResponse>>()?;

        if let Some(first) = observations.first() {
            if first.date != range.start {
                return Err(MalformedResponse::WrongStart {
                    expected: range.start,
                    found: first.date,
                });
            }
        }

        Ok(ArchiveSeries {
            elevation: self.elevation,
            series: DailySeries::try_new(observations)?,
        })
    }
}
