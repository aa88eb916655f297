//! The single data file the dashboard page reads.

pub mod error;
mod io;

use crate::stats::anomalies::{anomalies, Anomalies};
use crate::stats::envelope::{day_records, Envelope};
use crate::stats::monthly::{monthly_summaries, MonthlySummary};
use crate::stats::normals::DayOfYearSeries;
use crate::stats::samples_by_day;
use crate::stats::summary::{summarize, Summary};
use crate::types::location::{Location, LocationInfo};
use crate::types::observation::{DailySeries, SeriesColumns};
use crate::types::period::{DatePeriod, HistoryWindow};
use crate::types::unit::TemperatureUnit;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the artifact is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArtifactFormat {
    /// `const DATA = {...};`, loadable with a `<script>` tag from `file://`.
    #[default]
    Js,
    /// The bare JSON document.
    Json,
}

impl ArtifactFormat {
    /// `Json` for a `.json` extension, `Js` for anything else.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ArtifactFormat::Json,
            _ => ArtifactFormat::Js,
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactFormat::Js => write!(f, "js"),
            ArtifactFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(ArtifactFormat::Js),
            "json" => Ok(ArtifactFormat::Json),
            other => Err(format!("unknown artifact format '{other}', expected 'js' or 'json'")),
        }
    }
}

/// Run parameters recorded alongside the aggregates.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactMeta<'a> {
    pub location: &'a Location,
    pub elevation_m: Option<f64>,
    pub unit: TemperatureUnit,
    pub history: HistoryWindow,
    pub trailing_years: u32,
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub as_of: NaiveDate,
    pub year: i32,
    pub unit: TemperatureUnit,
    pub location: LocationInfo,
    pub history: HistoryWindow,
    pub trailing_window: HistoryWindow,
    pub current_year: SeriesColumns,
    pub normals: DayOfYearSeries,
    pub trailing_avg: DayOfYearSeries,
    pub historical_envelope: Envelope,
    pub historical_years: BTreeMap<i32, SeriesColumns>,
    pub monthly: Vec<MonthlySummary>,
    pub anomalies: Anomalies,
    pub summary: Summary,
}

impl Artifact {
    /// Derives every aggregate from `history` and `current` in one pass.
    ///
    /// `history` is expected to cover `meta.history`; days outside that window
    /// are ignored. `current` is the year-to-date series ending at `meta.as_of`.
    pub fn assemble(meta: &ArtifactMeta<'_>, history: &DailySeries, current: &DailySeries) -> Artifact {
        let window = meta.history;
        let trailing_window = window.trailing(meta.trailing_years);
        let history = window
            .get_date_period()
            .map(|range| history.restrict_to(range))
            .unwrap_or_default();

        let day_samples = samples_by_day(&history, |_| true);
        let trailing_samples = samples_by_day(&history, |d| trailing_window.contains(d.year()));

        let normals = DayOfYearSeries::from_samples(&day_samples);
        let trailing_avg = DayOfYearSeries::from_samples(&trailing_samples);
        let historical_envelope = Envelope::from_samples(&day_samples);

        let historical_years: BTreeMap<i32, SeriesColumns> = history
            .split_by_year()
            .iter()
            .map(|(year, series)| (*year, SeriesColumns::from(series)))
            .collect();

        let monthly = monthly_summaries(&history, current, &day_records(&day_samples));
        let anomalies = anomalies(&monthly, current, &normals);
        let summary = summarize(current, &normals, &monthly, meta.unit);

        Artifact {
            as_of: meta.as_of,
            year: meta.as_of.year(),
            unit: meta.unit,
            location: LocationInfo::new(meta.location, meta.elevation_m),
            history: window,
            trailing_window,
            current_year: SeriesColumns::from(current),
            normals,
            trailing_avg,
            historical_envelope,
            historical_years,
            monthly,
            anomalies,
            summary,
        }
    }
}
