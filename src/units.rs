use serde::Deserialize;

/// Placeholder shown when a value is missing
pub const MISSING: &str = "–";

/// Temperature unit used when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(alias = "c", alias = "C", alias = "celsius")]
    Celsius,
    #[serde(alias = "f", alias = "F", alias = "fahrenheit")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Convert Celsius to Fahrenheit
///
/// # Arguments
///
/// * 'temp' - temperature in Celsius
pub fn celsius_to_fahrenheit(temp: f64) -> f64 {
    temp * 9.0 / 5.0 + 32.0
}

/// Returns the whole number to display for a Celsius value in the given unit.
///
/// Halves round up, so -2.5 displays as -2 and 2.5 as 3.
///
/// # Arguments
///
/// * 'celsius' - temperature in Celsius
/// * 'unit' - unit to display in
pub fn display_value(celsius: f64, unit: TemperatureUnit) -> i64 {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };

    (value + 0.5).floor() as i64
}

/// Formats an optional Celsius value, e.g. "21°C", or the missing placeholder
///
/// # Arguments
///
/// * 'celsius' - temperature in Celsius, if known
/// * 'unit' - unit to display in
pub fn format_temperature(celsius: Option<f64>, unit: TemperatureUnit) -> String {
    match celsius {
        Some(c) => format!("{}{}", display_value(c, unit), unit.symbol()),
        None => MISSING.to_string(),
    }
}
