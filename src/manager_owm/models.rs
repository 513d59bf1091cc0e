use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst, VecSkipError};
use crate::daily_forecast::ForecastSample;

#[serde_as]
#[derive(Deserialize)]
pub struct Condition {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub icon: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ForecastMain {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub temp_min: Option<f64>,
}

/// One forecast entry, a wrongly typed field reads as absent
#[serde_as]
#[derive(Deserialize)]
pub struct ForecastItem {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub dt_txt: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub main: Option<ForecastMain>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub weather: Option<Vec<Condition>>,
}

/// Forecast document, entries that are not objects are dropped on their own
#[serde_as]
#[derive(Deserialize)]
pub struct FullForecast {
    #[serde_as(as = "DefaultOnError<VecSkipError<_>>")]
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

#[derive(Deserialize)]
pub struct Sys {
    pub country: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct CurrentMain {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

#[derive(Deserialize)]
pub struct CurrentResponse {
    pub name: Option<String>,
    pub sys: Option<Sys>,
    pub main: Option<CurrentMain>,
    pub wind: Option<Wind>,
    pub weather: Option<Vec<Condition>>,
}

/// Error document returned by OpenWeatherMap, `cod` comes as a number or a string
#[serde_as]
#[derive(Deserialize)]
pub struct ErrorPayload {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub cod: Option<u16>,
    pub message: Option<String>,
}

/// Current conditions for a location, as handed to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub city: Option<String>,
    pub country: String,
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<u8>,
    pub wind_speed: Option<f64>,
    pub description: String,
    pub icon: String,
}

fn first_condition(weather: Option<Vec<Condition>>) -> (Option<String>, Option<String>) {
    weather
        .and_then(|w| w.into_iter().next())
        .map(|c| (c.description, c.icon))
        .unwrap_or_default()
}

impl From<ForecastItem> for ForecastSample {
    fn from(item: ForecastItem) -> Self {
        let (condition_text, icon_code) = first_condition(item.weather);
        ForecastSample {
            timestamp_text: item.dt_txt,
            temp_max: item.main.as_ref().and_then(|m| m.temp_max),
            temp_min: item.main.as_ref().and_then(|m| m.temp_min),
            condition_text,
            icon_code,
        }
    }
}

impl From<CurrentResponse> for CurrentConditions {
    fn from(r: CurrentResponse) -> Self {
        let (description, icon) = first_condition(r.weather);
        CurrentConditions {
            city: r.name,
            country: r.sys.and_then(|s| s.country).unwrap_or_default(),
            temp: r.main.as_ref().and_then(|m| m.temp),
            feels_like: r.main.as_ref().and_then(|m| m.feels_like),
            humidity: r.main.as_ref().and_then(|m| m.humidity),
            wind_speed: r.wind.and_then(|w| w.speed),
            description: description.unwrap_or_default(),
            icon: icon.unwrap_or_default(),
        }
    }
}
