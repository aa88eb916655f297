//! This module provides the main entry point: a configured dashboard generator
//! that fetches the archive series for one location, aggregates them and writes
//! the artifact the static page reads.

use crate::archive::client::{ArchiveClient, ArchiveRequest, DEFAULT_ARCHIVE_URL, DEFAULT_TIMEOUT};
use crate::artifact::{Artifact, ArtifactFormat, ArtifactMeta};
use crate::error::DashboardError;
use crate::types::location::Location;
use crate::types::period::{DatePeriod, HistoryWindow, YearToDate};
use crate::types::unit::TemperatureUnit;
use bon::bon;
use chrono::{Datelike, NaiveDate};
use log::info;
use std::path::Path;
use std::time::Duration;

/// Years of the history window averaged into the trailing series.
pub const DEFAULT_TRAILING_YEARS: u32 = 10;

/// Generates dashboard artifacts for one fixed location.
///
/// Create an instance with [`TemperatureDashboard::builder()`]. Every setting is
/// optional; the defaults describe Denver, CO in Fahrenheit with normals taken
/// from the 30 complete years before the as-of date.
///
/// # Examples
///
/// ```no_run
/// # use tempdash::{TemperatureDashboard, DashboardError};
/// # use std::path::Path;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = TemperatureDashboard::builder().build()?;
/// let artifact = dashboard
///     .run()
///     .output(Path::new("dashboard/data.js"))
///     .call()
///     .await?;
/// println!("{} days this year", artifact.current_year.dates.len());
/// # Ok(())
/// # }
/// ```
pub struct TemperatureDashboard {
    client: ArchiveClient,
    location: Location,
    unit: TemperatureUnit,
    history: Option<HistoryWindow>,
    trailing_years: u32,
}

#[bon]
impl TemperatureDashboard {
    /// Builds a dashboard generator.
    ///
    /// # Arguments
    ///
    /// * `.location(Location)`: Optional. Defaults to [`Location::denver()`].
    /// * `.unit(TemperatureUnit)`: Optional. Defaults to Fahrenheit.
    /// * `.history(HistoryWindow)`: Optional. Defaults to the 30 years preceding the as-of year.
    /// * `.trailing_years(u32)`: Optional. Defaults to [`DEFAULT_TRAILING_YEARS`].
    /// * `.api_url(String)`: Optional. Defaults to the public Open-Meteo archive.
    /// * `.timeout(Duration)`: Optional. Per-request timeout, defaults to 60 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidConfig`] for out-of-range coordinates or an
    /// empty history window, and [`DashboardError::Archive`] if the HTTP client
    /// cannot be created.
    #[builder]
    pub fn new(
        location: Option<Location>,
        unit: Option<TemperatureUnit>,
        history: Option<HistoryWindow>,
        trailing_years: Option<u32>,
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DashboardError> {
        let location = location.unwrap_or_else(Location::denver);
        if !location.coordinates.is_valid() {
            return Err(DashboardError::InvalidConfig(format!(
                "coordinates {:?} are out of range",
                location.coordinates
            )));
        }
        if let Some(window) = history {
            if window.start_year > window.end_year {
                return Err(DashboardError::InvalidConfig(format!(
                    "history window {window} starts after it ends"
                )));
            }
        }
        let client = ArchiveClient::new(
            api_url.as_deref().unwrap_or(DEFAULT_ARCHIVE_URL),
            timeout.unwrap_or(DEFAULT_TIMEOUT),
        )?;
        Ok(Self {
            client,
            location,
            unit: unit.unwrap_or_default(),
            history,
            trailing_years: trailing_years.unwrap_or(DEFAULT_TRAILING_YEARS),
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// The history window used for a run ending on `as_of`.
    pub fn history_for(&self, as_of: NaiveDate) -> HistoryWindow {
        self.history
            .unwrap_or_else(|| HistoryWindow::preceding(as_of))
    }

    fn validate(&self, as_of: NaiveDate, window: HistoryWindow) -> Result<(), DashboardError> {
        if window.start_year < HistoryWindow::FIRST_ARCHIVE_YEAR {
            return Err(DashboardError::InvalidConfig(format!(
                "history window {window} starts before the archive's first year {}",
                HistoryWindow::FIRST_ARCHIVE_YEAR
            )));
        }
        if window.end_year >= as_of.year() {
            return Err(DashboardError::InvalidConfig(format!(
                "history window {window} must end before {}",
                as_of.year()
            )));
        }
        if self.trailing_years == 0 || i64::from(self.trailing_years) > window.num_years() {
            return Err(DashboardError::InvalidConfig(format!(
                "trailing years must be between 1 and {}, got {}",
                window.num_years(),
                self.trailing_years
            )));
        }
        Ok(())
    }

    /// Fetches both ranges and aggregates them, without touching the filesystem.
    ///
    /// One request covers the whole history window and one covers January 1st
    /// through `as_of`. Either failing fails the whole call.
    pub async fn generate(&self, as_of: NaiveDate) -> Result<Artifact, DashboardError> {
        let window = self.history_for(as_of);
        self.validate(as_of, window)?;
        let history_range = window
            .get_date_period()
            .ok_or(DashboardError::DateParsingError)?;
        let current_range = YearToDate(as_of)
            .get_date_period()
            .ok_or(DashboardError::DateParsingError)?;

        info!(
            "Fetching {} historical years ({}) for {}",
            window.num_years(),
            window,
            self.location.name
        );
        let history = self
            .client
            .fetch_daily(&ArchiveRequest {
                location: &self.location,
                range: history_range,
                unit: self.unit,
            })
            .await?;

        info!("Fetching current year ({})", current_range);
        let current = self
            .client
            .fetch_daily(&ArchiveRequest {
                location: &self.location,
                range: current_range,
                unit: self.unit,
            })
            .await?;

        info!("Computing normals, envelope and monthly stats");
        let meta = ArtifactMeta {
            location: &self.location,
            elevation_m: current.elevation.or(history.elevation),
            unit: self.unit,
            history: window,
            trailing_years: self.trailing_years,
            as_of,
        };
        Ok(Artifact::assemble(&meta, &history.series, &current.series))
    }

    /// Generates the artifact and atomically replaces `output` with it.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.output(&Path)`: **Required.** Where the artifact is written.
    /// * `.format(ArtifactFormat)`: Optional. Inferred from the extension of `output`.
    /// * `.as_of(NaiveDate)`: Optional. Last day of the current-year range, defaults to
    ///   today in the location's timezone.
    ///
    /// # Errors
    ///
    /// Any fetch, validation or write error. Nothing is written unless every
    /// step before the write succeeded, so `output` keeps its previous contents.
    #[builder]
    pub async fn run(
        &self,
        output: &Path,
        format: Option<ArtifactFormat>,
        as_of: Option<NaiveDate>,
    ) -> Result<Artifact, DashboardError> {
        let as_of = as_of.unwrap_or_else(|| self.location.today());
        let format = format.unwrap_or_else(|| ArtifactFormat::from_path(output));
        let artifact = self.generate(as_of).await?;
        artifact.write_atomic(output, format).await?;
        log_summary(&artifact);
        Ok(artifact)
    }
}

fn log_summary(artifact: &Artifact) {
    let symbol = artifact.unit.symbol();
    let summary = &artifact.summary;
    info!(
        "{}: {} days of {} data, history {}",
        artifact.location.name,
        artifact.current_year.dates.len(),
        artifact.year,
        artifact.history
    );
    if let Some(latest) = &summary.latest {
        info!(
            "Latest {}: high {:.1}{symbol}, low {:.1}{symbol}",
            latest.date, latest.high, latest.low
        );
    }
    if let (Some(high), Some(normal)) = (summary.ytd_avg_high, summary.ytd_normal_avg_high) {
        info!("YTD average high {high:.1}{symbol} (normal {normal:.1}{symbol})");
    }
    if let (Some(low), Some(normal)) = (summary.ytd_avg_low, summary.ytd_normal_avg_low) {
        info!("YTD average low {low:.1}{symbol} (normal {normal:.1}{symbol})");
    }
    info!(
        "{} days below freezing, {} frost days, {} hot days, {} new record highs, {} new record lows",
        summary.days_below_freezing,
        summary.frost_days,
        summary.hot_days,
        summary.new_record_highs,
        summary.new_record_lows
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LatLon;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() -> Result<(), DashboardError> {
        let dashboard = TemperatureDashboard::builder().build()?;
        assert_eq!(dashboard.location().name, "Denver, CO");
        assert_eq!(dashboard.unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(
            dashboard.history_for(date(2026, 10, 17)),
            HistoryWindow::new(1996, 2025)
        );
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        let result = TemperatureDashboard::builder()
            .location(Location::new("Nowhere", LatLon(120.0, 0.0), "UTC"))
            .build();
        assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_history_window() {
        let result = TemperatureDashboard::builder()
            .history(HistoryWindow::new(2020, 2010))
            .build();
        assert!(matches!(result, Err(DashboardError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_window_reaching_current_year_fails_before_any_request() {
        // unroutable URL: reaching the network would produce an Archive error instead
        let dashboard = TemperatureDashboard::builder()
            .history(HistoryWindow::new(1997, 2026))
            .api_url("http://127.0.0.1:9/v1/archive".to_string())
            .build()
            .unwrap();
        let err = dashboard.generate(date(2026, 3, 1)).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_window_before_archive_start_fails_before_any_request() {
        for window in [HistoryWindow::new(i32::MIN, 2000), HistoryWindow::new(1939, 2000)] {
            let dashboard = TemperatureDashboard::builder()
                .history(window)
                .api_url("http://127.0.0.1:9/v1/archive".to_string())
                .build()
                .unwrap();
            let err = dashboard.generate(date(2026, 3, 1)).await.unwrap_err();
            assert!(matches!(err, DashboardError::InvalidConfig(_)), "{window}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_huge_trailing_years_is_rejected() {
        let dashboard = TemperatureDashboard::builder()
            .history(HistoryWindow::new(1996, 2025))
            .trailing_years(u32::MAX)
            .api_url("http://127.0.0.1:9/v1/archive".to_string())
            .build()
            .unwrap();
        let err = dashboard.generate(date(2026, 3, 1)).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_trailing_years_must_fit_window() {
        let dashboard = TemperatureDashboard::builder()
            .history(HistoryWindow::new(2020, 2025))
            .trailing_years(7)
            .api_url("http://127.0.0.1:9/v1/archive".to_string())
            .build()
            .unwrap();
        let err = dashboard.generate(date(2026, 3, 1)).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }
}
