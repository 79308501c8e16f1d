use serde::Deserialize;

/// Condition label used when the payload carries no `weather[]` entries.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Current weather for one city, with every field already defaulted.
///
/// Built once per successful fetch by [`WeatherResult::from_payload`] and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    /// Degrees Celsius; `None` renders as "N/A".
    pub temperature: Option<f64>,
    pub humidity: i64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Sea-level pressure, hPa.
    pub pressure: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Unix seconds.
    pub sunrise: i64,
    /// Unix seconds.
    pub sunset: i64,
    pub condition: String,
}

impl WeatherResult {
    /// The one place where missing payload fields get their defaults.
    pub fn from_payload(payload: CurrentPayload) -> Self {
        let main = payload.main.unwrap_or_default();
        let wind = payload.wind.unwrap_or_default();
        let sys = payload.sys.unwrap_or_default();

        let condition = payload
            .weather
            .unwrap_or_default()
            .into_iter()
            .next()
            .flatten()
            .and_then(|w| w.main)
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        Self {
            temperature: main.temp,
            humidity: main.humidity.unwrap_or(0),
            wind_speed: wind.speed.unwrap_or(0.0),
            pressure: main.pressure.unwrap_or(0),
            temp_min: main.temp_min.unwrap_or(0.0),
            temp_max: main.temp_max.unwrap_or(0.0),
            sunrise: sys.sunrise.unwrap_or(0),
            sunset: sys.sunset.unwrap_or(0),
            condition,
        }
    }
}

// Raw `/weather` payload. Field names follow the OpenWeather API; every
// group and every field may be absent or null.

#[derive(Debug, Default, Deserialize)]
pub struct CurrentPayload {
    #[serde(default)]
    pub main: Option<MainGroup>,
    #[serde(default)]
    pub wind: Option<WindGroup>,
    #[serde(default)]
    pub sys: Option<SysGroup>,
    #[serde(default)]
    pub weather: Option<Vec<Option<ConditionEntry>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MainGroup {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<i64>,
    #[serde(default)]
    pub pressure: Option<i64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WindGroup {
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SysGroup {
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub main: Option<String>,
}
