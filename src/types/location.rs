//! Geographic types describing where the dashboard's temperatures come from.

use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use tempdash::LatLon;
///
/// let denver = LatLon(39.7392, -104.9903);
/// assert_eq!(denver.0, 39.7392); // Latitude
/// assert_eq!(denver.1, -104.9903); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }

    /// Whether both components are finite and inside the valid degree ranges.
    pub fn is_valid(self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-90.0..=90.0).contains(&self.0)
            && (-180.0..=180.0).contains(&self.1)
    }
}

/// The fixed place a dashboard is generated for.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Display name, e.g. "Denver, CO".
    pub name: String,
    pub coordinates: LatLon,
    /// IANA timezone passed to the archive so daily boundaries are local days.
    pub timezone: String,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: LatLon, timezone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates,
            timezone: timezone.into(),
        }
    }

    pub fn denver() -> Self {
        Self::new("Denver, CO", LatLon(39.7392, -104.9903), "America/Denver")
    }

    /// The calendar date at `now` in this location's timezone.
    ///
    /// Falls back to the host's local date when the timezone is not an IANA
    /// name the `chrono-tz` database knows (the archive also accepts `auto`).
    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => now.with_timezone(&tz).date_naive(),
            Err(_) => {
                warn!(
                    "Unknown timezone '{}', using the local date",
                    self.timezone
                );
                now.with_timezone(&Local).date_naive()
            }
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}

/// Location metadata as written into the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    /// Elevation in meters as reported by the archive, if it reported one.
    pub elevation_m: Option<f64>,
}

impl LocationInfo {
    pub fn new(location: &Location, elevation_m: Option<f64>) -> Self {
        Self {
            name: location.name.clone(),
            lat: location.coordinates.latitude(),
            lon: location.coordinates.longitude(),
            timezone: location.timezone.clone(),
            elevation_m,
        }
    }
}
