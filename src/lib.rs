mod archive;
mod artifact;
mod dashboard;
mod error;
mod stats;
mod types;

pub use dashboard::*;
pub use error::DashboardError;

pub use archive::client::{ArchiveClient, ArchiveRequest, ArchiveSeries, DEFAULT_ARCHIVE_URL, DEFAULT_TIMEOUT};
pub use archive::error::{ArchiveError, MalformedResponse};

pub use artifact::error::ArtifactError;
pub use artifact::{Artifact, ArtifactFormat, ArtifactMeta};

pub use stats::anomalies::{Anomalies, DailyDepartures};
pub use stats::envelope::{day_records, percentile, Bands, Envelope, MIN_ENVELOPE_SAMPLES, PERCENTILE_RANKS};
pub use stats::monthly::{month_name, MonthlySummary, RecordDay, RecordValue};
pub use stats::normals::DayOfYearSeries;
pub use stats::summary::{DayExtreme, LatestDay, Summary};
pub use stats::{samples_by_day, Samples};

pub use types::location::{LatLon, Location, LocationInfo};
pub use types::month_day::{MonthDay, ParseMonthDayError};
pub use types::observation::{DailyObservation, DailySeries, SeriesColumns, SeriesError};
pub use types::period::{DatePeriod, DateRange, HistoryWindow, Year, YearToDate};
pub use types::unit::TemperatureUnit;
