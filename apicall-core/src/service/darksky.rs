use serde::Deserialize;

use crate::request::{Credential, RequestSpec};

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

/// Dark Sky's summary icon for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ClearDay,
    ClearNight,
    Cloudy,
    Fog,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Rain,
    Sleet,
    Snow,
    Wind,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::ClearDay => "☀️",
            Icon::ClearNight => "🌙",
            Icon::Cloudy => "☁️",
            Icon::Fog => "🌁",
            Icon::PartlyCloudyDay => "⛅️",
            Icon::PartlyCloudyNight => "🌙",
            Icon::Rain => "☔️",
            Icon::Sleet => "❄️ ☔️",
            Icon::Snow => "❄️",
            Icon::Wind => "🍃",
            Icon::Error => "❗️",
            Icon::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    /// Start of the day, unix seconds.
    pub time: i64,
    #[serde(default)]
    pub icon: Icon,
    pub temperature_high: f64,
    pub temperature_low: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Daily {
    pub data: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    pub daily: Daily,
}

/// `GET /forecast/{key}/{lat},{long}/?units=ca` (Celsius, km/h).
pub fn forecast_request(base_url: &str, secret_key: &str, latitude: f64, longitude: f64) -> RequestSpec {
    RequestSpec::get(format!("{base_url}/forecast/{{key}}/{{lat}},{{long}}/"))
        .credential(Credential::PathParam {
            name: "key".into(),
            value: secret_key.into(),
        })
        .path_param("lat", latitude)
        .path_param("long", longitude)
        .query("units", "ca")
        .error_field("error")
        .build()
}
