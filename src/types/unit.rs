use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit every temperature in a run is requested and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Value of the archive's `temperature_unit` query parameter.
    pub(crate) fn api_param(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Celsius => "celsius",
        }
    }

    /// Unit label the archive puts in `daily_units`.
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }

    pub fn freezing_point(self) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => 32.0,
            TemperatureUnit::Celsius => 0.0,
        }
    }

    /// Highs at or above this count as hot days (90 °F, 32 °C).
    pub fn hot_threshold(self) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => 90.0,
            TemperatureUnit::Celsius => 32.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_param())
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            other => Err(format!(
                "unknown temperature unit '{other}', expected 'fahrenheit' or 'celsius'"
            )),
        }
    }
}
