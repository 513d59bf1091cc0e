use serde::Serialize;
use crate::daily_forecast::DailySummary;
use crate::icons::{pictogram, Pictogram};
use crate::manager_owm::models::CurrentConditions;
use crate::units::{format_temperature, TemperatureUnit, MISSING};

/// Shown in place of an empty condition text
const NO_CONDITION: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentView {
    pub location: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub description: String,
    pub icon: Option<Pictogram>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRow {
    pub day_name: String,
    pub date: String,
    pub high_low: String,
    pub condition: String,
    pub icon: Option<Pictogram>,
}

/// Display ready result of a search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub unit: &'static str,
    pub current: CurrentView,
    pub forecast: Vec<ForecastRow>,
}

/// What a search left on display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchOutcome {
    Found(SearchView),
    Failed { message: String },
}

/// Renders current conditions and the daily forecast for display
///
/// # Arguments
///
/// * 'term' - what the user searched for, used when the provider gives no place name
/// * 'current' - current conditions
/// * 'forecast' - daily forecast, possibly empty
/// * 'unit' - temperature unit to display in
pub fn render_search(
    term: &str,
    current: &CurrentConditions,
    forecast: &[DailySummary],
    unit: TemperatureUnit,
) -> SearchView {
    SearchView {
        unit: unit.symbol(),
        current: render_current(term, current, unit),
        forecast: forecast.iter().map(|d| render_day(d, unit)).collect(),
    }
}

fn render_current(term: &str, current: &CurrentConditions, unit: TemperatureUnit) -> CurrentView {
    let location = match current.city.as_deref() {
        Some(city) if !city.is_empty() && !current.country.is_empty() => {
            format!("{}, {}", city, current.country)
        }
        _ => term.to_string(),
    };

    CurrentView {
        location,
        temperature: format_temperature(current.temp, unit),
        feels_like: format_temperature(current.feels_like, unit),
        humidity: current.humidity.map_or_else(|| MISSING.to_string(), |h| format!("{}%", h)),
        wind: current.wind_speed.map_or_else(|| MISSING.to_string(), |w| format!("{} m/s", w)),
        description: current.description.clone(),
        icon: pictogram(&current.description, &current.icon),
    }
}

fn render_day(day: &DailySummary, unit: TemperatureUnit) -> ForecastRow {
    let high_low = match (day.high, day.low) {
        (Some(_), Some(_)) => format!(
            "{} / {}",
            format_temperature(day.high, unit),
            format_temperature(day.low, unit)
        ),
        _ => MISSING.to_string(),
    };

    ForecastRow {
        day_name: day.day_name.clone(),
        date: day.date.clone(),
        high_low,
        condition: if day.condition.is_empty() { NO_CONDITION.to_string() } else { day.condition.clone() },
        icon: pictogram(&day.condition, &day.icon),
    }
}
