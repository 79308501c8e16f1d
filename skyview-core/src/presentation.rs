//! Turns a [`WeatherResult`] into display strings and picks the themed
//! background/animation pair for its condition.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::model::WeatherResult;

/// Visual theme behind an [`AssetPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Sunny,
    Cloudy,
    Rain,
    Snow,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rain => "rain",
            Theme::Snow => "snow",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background image and animation resource ids for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    pub theme: Theme,
    pub background: &'static str,
    pub animation: &'static str,
}

pub const SUNNY: AssetPair =
    AssetPair { theme: Theme::Sunny, background: "sunny", animation: "sunny-animation" };
pub const CLOUDY: AssetPair =
    AssetPair { theme: Theme::Cloudy, background: "cloudy", animation: "cloud-animation" };
pub const RAIN: AssetPair =
    AssetPair { theme: Theme::Rain, background: "rain", animation: "rain-animation" };
pub const SNOW: AssetPair =
    AssetPair { theme: Theme::Snow, background: "snow", animation: "snow-animation" };

/// Used for every condition the table does not list.
pub const DEFAULT_ASSETS: AssetPair = SUNNY;

/// Condition label → assets. Matching is exact and case-sensitive.
pub static CONDITION_ASSETS: &[(&str, AssetPair)] = &[
    ("Clear", SUNNY),
    ("Sunny", SUNNY),
    ("Haze", SUNNY),
    ("Clouds", CLOUDY),
    ("Partly Cloudy", CLOUDY),
    ("Overcast", CLOUDY),
    ("Mist", CLOUDY),
    ("Fog", CLOUDY),
    ("Rain", RAIN),
    ("Drizzle", RAIN),
    ("Showers", RAIN),
    ("Snow", SNOW),
    ("Blizzard", SNOW),
];

/// Look up the asset pair for `condition`, falling back to [`DEFAULT_ASSETS`].
///
/// Never fails; an unlisted condition is logged once at `WARN`.
pub fn select_assets(condition: &str) -> AssetPair {
    debug!(condition, "selecting assets for condition");

    let assets = match CONDITION_ASSETS.iter().find(|(label, _)| *label == condition) {
        Some((_, assets)) => *assets,
        None => {
            warn!(condition, "unexpected weather condition, using default assets");
            DEFAULT_ASSETS
        }
    };

    debug!(background = assets.background, "background resource selected");
    debug!(animation = assets.animation, "animation resource selected");
    assets
}

/// Everything the screen shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub city: String,
    pub temperature: String,
    pub condition: String,
    pub max_temp: String,
    pub min_temp: String,
    pub humidity: String,
    pub wind_speed: String,
    pub sunrise: String,
    pub sunset: String,
    pub sea_level: String,
    pub day: String,
    pub date: String,
    pub assets: AssetPair,
}

/// Build the display model for `result`.
///
/// `now` supplies both the wall-clock date/day and the timezone that
/// sunrise/sunset are rendered in. Output depends only on the arguments.
pub fn map<Tz>(result: &WeatherResult, requested_city: &str, now: &DateTime<Tz>) -> DisplayModel
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let temperature = result.temperature.map(format_number).unwrap_or_else(|| "N/A".to_string());

    DisplayModel {
        city: requested_city.to_string(),
        temperature: format!("{temperature} °C"),
        condition: result.condition.clone(),
        max_temp: format!("Max Temp: {} °C", format_number(result.temp_max)),
        min_temp: format!("Min Temp: {} °C", format_number(result.temp_min)),
        humidity: format!("{} %", result.humidity),
        wind_speed: format!("{} m/s", format_number(result.wind_speed)),
        sunrise: format_clock(result.sunrise, &now.timezone()),
        sunset: format_clock(result.sunset, &now.timezone()),
        sea_level: result.pressure.to_string(),
        day: now.format("%A").to_string(),
        date: now.format("%d %b %Y").to_string(),
        assets: select_assets(&result.condition),
    }
}

/// `HH:mm` for a Unix-seconds instant in `tz`.
pub fn format_clock<Tz>(unix_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let instant = DateTime::<Utc>::from_timestamp(unix_secs, 0).unwrap_or_else(|| {
        warn!(unix_secs, "timestamp out of range, rendering the epoch instead");
        DateTime::<Utc>::default()
    });
    instant.with_timezone(tz).format("%H:%M").to_string()
}

/// Whole values keep one decimal place (`25.0`), others print as-is.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
