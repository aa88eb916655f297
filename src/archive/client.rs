//! HTTP access to the Open-Meteo historical archive.

use crate::archive::error::ArchiveError;
use crate::archive::response::{ApiErrorBody, ArchiveResponse, DAILY_VARIABLES};
use crate::types::location::Location;
use crate::types::period::DateRange;
use crate::types::unit::TemperatureUnit;
use log::{debug, info, warn};
use reqwest::Client;
use std::time::Duration;

pub use crate::archive::response::ArchiveSeries;

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One daily high/low request for a place and an inclusive date range.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    pub location: &'a Location,
    pub range: DateRange,
    pub unit: TemperatureUnit,
}

/// Issues single-attempt requests against the archive endpoint.
pub struct ArchiveClient {
    base_url: String,
    download_client: Client,
}

impl ArchiveClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<ArchiveClient, ArchiveError> {
        let download_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ArchiveError::ClientBuild)?;
        Ok(ArchiveClient {
            base_url: base_url.to_string(),
            download_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the daily highs and lows for `request.range`.
    ///
    /// There is no retry: a connection failure, a non-2xx status or a response
    /// that does not cover the range day by day is returned as an error.
    pub async fn fetch_daily(
        &self,
        request: &ArchiveRequest<'_>,
    ) -> Result<ArchiveSeries, ArchiveError> {
        let coordinates = request.location.coordinates;
        let query = [
            ("latitude", coordinates.latitude().to_string()),
            ("longitude", coordinates.longitude().to_string()),
            ("start_date", request.range.start.format("%Y-%m-%d").to_string()),
            ("end_date", request.range.end.format("%Y-%m-%d").to_string()),
            ("daily", DAILY_VARIABLES.to_string()),
            ("timezone", request.location.timezone.clone()),
            ("temperature_unit", request.unit.api_param().to_string()),
        ];
        let http_request = self
            .download_client
            .get(&self.base_url)
            .query(&query)
            .build()
            .map_err(|e| ArchiveError::InvalidRequest(self.base_url.clone(), e))?;
        let url = http_request.url().to_string();
        debug!("Requesting {}", url);

        let response = self
            .download_client
            .execute(http_request)
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("HTTP error {} for {}", status, url);
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api_error) => ArchiveError::Api {
                    url,
                    status,
                    reason: api_error.reason,
                },
                Err(_) => ArchiveError::HttpStatus { url, status },
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;
        let parsed: ArchiveResponse =
            serde_json::from_slice(&body).map_err(|source| ArchiveError::JsonParse {
                url: url.clone(),
                source,
            })?;
        let fetched = parsed
            .into_series(request.range, request.unit)
            .map_err(|source| ArchiveError::Malformed { url, source })?;

        info!(
            "Received {} days for {} ({})",
            fetched.series.len(),
            request.location.name,
            request.range
        );
        Ok(fetched)
    }
}
