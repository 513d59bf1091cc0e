use serde::Serialize;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Something displayable for a weather condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Pictogram {
    Emoji(&'static str),
    Url(String),
}

/// Picks a pictogram for a condition/icon code pair.
///
/// Tries a specific match on the provider code family and on keywords in the condition
/// text first, then the icon hosted by the provider for the code, and gives up when
/// neither is available.
///
/// # Arguments
///
/// * 'condition' - condition description, e.g. "light rain"
/// * 'code' - provider icon code, e.g. "10d"
pub fn pictogram(condition: &str, code: &str) -> Option<Pictogram> {
    if let Some(emoji) = emoji_for_code(code).or_else(|| emoji_for_condition(condition)) {
        return Some(Pictogram::Emoji(emoji));
    }

    if code.trim().is_empty() {
        None
    } else {
        Some(Pictogram::Url(format!("{}/{}@2x.png", ICON_BASE_URL, code.trim())))
    }
}

fn emoji_for_code(code: &str) -> Option<&'static str> {
    let family = code.get(..2)?;
    match family {
        "01" => Some("☀️"),
        "02" => Some("⛅️"),
        "03" | "04" => Some("☁️"),
        "09" | "10" => Some("🌧️"),
        "11" => Some("⛈️"),
        "13" => Some("❄️"),
        "50" => Some("🌫️"),
        _ => None,
    }
}

fn emoji_for_condition(condition: &str) -> Option<&'static str> {
    let condition = condition.to_lowercase();

    // Order matters, "thunderstorm with rain" is a thunderstorm
    let keywords: [(&[&str], &'static str); 6] = [
        (&["thunder"], "⛈️"),
        (&["snow", "sleet"], "❄️"),
        (&["rain", "drizzle", "shower"], "🌧️"),
        (&["mist", "fog", "haze", "smoke", "dust"], "🌫️"),
        (&["clear", "sun"], "☀️"),
        (&["cloud", "overcast"], "☁️"),
    ];

    keywords
        .iter()
        .find(|(words, _)| words.iter().any(|w| condition.contains(w)))
        .map(|(_, emoji)| *emoji)
}
