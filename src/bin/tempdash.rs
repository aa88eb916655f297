//! tempdash: fetch temperatures for one location and write the dashboard data file.

use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tempdash::{
    ArtifactFormat, DashboardError, HistoryWindow, LatLon, Location, TemperatureDashboard,
    TemperatureUnit, DEFAULT_ARCHIVE_URL, DEFAULT_TRAILING_YEARS,
};

#[derive(Parser, Debug)]
#[command(
    name = "tempdash",
    version,
    about = "Fetch daily temperatures and historical normals into a static dashboard data file"
)]
struct Cli {
    /// Artifact path, replaced atomically
    #[arg(short, long, default_value = "dashboard/data.js")]
    output: PathBuf,

    /// Artifact layout (js or json), inferred from the output extension if omitted
    #[arg(short, long)]
    format: Option<ArtifactFormat>,

    /// Display name of the location
    #[arg(long, default_value = "Denver, CO")]
    name: String,

    #[arg(long, default_value_t = 39.7392, allow_negative_numbers = true)]
    latitude: f64,

    #[arg(long, default_value_t = -104.9903, allow_negative_numbers = true)]
    longitude: f64,

    /// IANA timezone used for daily boundaries
    #[arg(long, default_value = "America/Denver")]
    timezone: String,

    /// fahrenheit or celsius
    #[arg(short, long, default_value_t = TemperatureUnit::Fahrenheit)]
    unit: TemperatureUnit,

    /// First year of the history window (default: 30 years before --history-end)
    #[arg(long)]
    history_start: Option<i32>,

    /// Last year of the history window (default: the year before --as-of)
    #[arg(long)]
    history_end: Option<i32>,

    /// Most recent years of the window averaged into the trailing series
    #[arg(long, default_value_t = DEFAULT_TRAILING_YEARS)]
    trailing_years: u32,

    /// Last day of the current-year range, YYYY-MM-DD (default: today in --timezone)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value = DEFAULT_ARCHIVE_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn history_window(&self, as_of: NaiveDate) -> Option<HistoryWindow> {
        let span = HistoryWindow::DEFAULT_YEARS - 1;
        match (self.history_start, self.history_end) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(HistoryWindow::new(start, end)),
            (Some(start), None) => Some(HistoryWindow::new(start, as_of.year() - 1)),
            (None, Some(end)) => Some(HistoryWindow::new(end.saturating_sub(span), end)),
        }
    }
}

async fn run(cli: Cli) -> Result<(), DashboardError> {
    let location = Location::new(
        cli.name.clone(),
        LatLon(cli.latitude, cli.longitude),
        cli.timezone.clone(),
    );
    let as_of = cli.as_of.unwrap_or_else(|| location.today());
    let dashboard = TemperatureDashboard::builder()
        .location(location)
        .unit(cli.unit)
        .maybe_history(cli.history_window(as_of))
        .trailing_years(cli.trailing_years)
        .api_url(cli.api_url.clone())
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    dashboard
        .run()
        .output(&cli.output)
        .maybe_format(cli.format)
        .as_of(as_of)
        .call()
        .await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tempdash").chain(args.iter().copied())).unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_history_window_flag_combinations() {
        assert_eq!(parse(&[]).history_window(as_of()), None);
        assert_eq!(
            parse(&["--history-start", "1981", "--history-end", "2010"]).history_window(as_of()),
            Some(HistoryWindow::new(1981, 2010))
        );
        assert_eq!(
            parse(&["--history-start", "2000"]).history_window(as_of()),
            Some(HistoryWindow::new(2000, 2025))
        );
        assert_eq!(
            parse(&["--history-end", "2020"]).history_window(as_of()),
            Some(HistoryWindow::new(1991, 2020))
        );
    }

    #[test]
    fn test_history_end_near_i32_min_does_not_overflow() {
        let cli = parse(&["--history-end=-2147483640"]);
        assert_eq!(
            cli.history_window(as_of()),
            Some(HistoryWindow::new(i32::MIN, -2147483640))
        );
    }

    #[test]
    fn test_defaults_and_negative_coordinates() {
        let cli = parse(&["--latitude", "-33.87", "--longitude", "151.21", "-vv", "--format", "json"]);
        assert_eq!(cli.latitude, -33.87);
        assert_eq!(cli.output, PathBuf::from("dashboard/data.js"));
        assert_eq!(cli.format, Some(ArtifactFormat::Json));
        assert_eq!(cli.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(cli.trailing_years, DEFAULT_TRAILING_YEARS);
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["tempdash", "--unit", "kelvin"]).is_err());
    }
}
