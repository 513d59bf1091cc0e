use chrono::NaiveDate;
use serde::Serialize;

/// Number of days kept in a daily forecast
pub const MAX_DAYS: usize = 5;

/// Time of day that wins the tie-break within a date
const MIDDAY: &str = "12:00:00";

/// One forecast data point as delivered by the provider, typically every third hour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSample {
    pub timestamp_text: Option<String>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub condition_text: Option<String>,
    pub icon_code: Option<String>,
}

/// One row of the daily forecast, picked from a single representative sample
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: String,
    pub day_name: String,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub condition: String,
    pub icon: String,
}

/// Reduces forecast samples to one summary per calendar day.
///
/// Dates are emitted in the order they are first seen and only the first [`MAX_DAYS`]
/// distinct dates are kept. Within a date the first sample stamped exactly `12:00:00`
/// is used, otherwise the first sample seen for that date.
///
/// Samples without a parseable `YYYY-MM-DD` date are skipped. This is stricter than
/// grouping on the raw text before the first space: a non blank but invalid date part,
/// e.g. `2024-02-30 12:00:00` or `2024-06-01T12:00:00`, forms no group at all.
///
/// # Arguments
///
/// * 'samples' - forecast samples in provider order
pub fn aggregate_daily(samples: &[ForecastSample]) -> Vec<DailySummary> {
    // Association list, keeps first-seen order of dates
    let mut by_date: Vec<(NaiveDate, &str, &ForecastSample)> = Vec::with_capacity(MAX_DAYS);

    for sample in samples {
        let Some((date_text, date, time_text)) = split_timestamp(sample) else {
            continue;
        };

        if let Some(entry) = by_date.iter_mut().find(|entry| entry.1 == date_text) {
            if time_text == Some(MIDDAY) && time_of_day(entry.2) != Some(MIDDAY) {
                entry.2 = sample;
            }
        } else if by_date.len() < MAX_DAYS {
            by_date.push((date, date_text, sample));
        }
    }

    by_date
        .into_iter()
        .map(|(date, date_text, sample)| DailySummary {
            date: date_text.to_string(),
            day_name: date.format("%A").to_string(),
            high: sample.temp_max,
            low: sample.temp_min,
            condition: sample.condition_text.clone().unwrap_or_default(),
            icon: sample.icon_code.clone().unwrap_or_default(),
        })
        .collect()
}

/// Splits a sample timestamp into its date text, parsed date and optional time text.
///
/// `NaiveDate` carries no zone, so the weekday is the one of the date at UTC midnight.
fn split_timestamp(sample: &ForecastSample) -> Option<(&str, NaiveDate, Option<&str>)> {
    let mut parts = sample.timestamp_text.as_deref()?.split(' ');
    let date_text = parts.next().filter(|d| !d.is_empty())?;
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").ok()?;

    Some((date_text, date, parts.next()))
}

fn time_of_day(sample: &ForecastSample) -> Option<&str> {
    sample.timestamp_text.as_deref()?.split(' ').nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: &str, high: f64, condition: &str) -> ForecastSample {
        ForecastSample {
            timestamp_text: Some(ts.to_string()),
            temp_max: Some(high),
            temp_min: Some(high - 5.0),
            condition_text: Some(condition.to_string()),
            icon_code: Some("01d".to_string()),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn test_single_day_prefers_midday() {
        let samples: Vec<ForecastSample> = ["00:00:00", "06:00:00", "12:00:00", "18:00:00", "21:00:00"]
            .iter()
            .enumerate()
            .map(|(i, t)| sample(&format!("2024-06-01 {}", t), i as f64, t))
            .collect();

        let days = aggregate_daily(&samples);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[0].day_name, "Saturday");
        assert_eq!(days[0].high, Some(2.0));
        assert_eq!(days[0].low, Some(-3.0));
        assert_eq!(days[0].condition, "12:00:00");
    }

    #[test]
    fn test_mixed_days_keep_order_and_fallback_to_first() {
        let samples = vec![
            sample("2024-06-01 15:00:00", 1.0, "a1"),
            sample("2024-06-01 18:00:00", 2.0, "a2"),
            sample("2024-06-02 09:00:00", 3.0, "b1"),
            sample("2024-06-02 12:00:00", 4.0, "b2"),
            sample("2024-06-03 00:00:00", 5.0, "c1"),
            sample("2024-06-03 03:00:00", 6.0, "c2"),
        ];

        let days = aggregate_daily(&samples);
        let picked: Vec<(&str, &str)> = days.iter().map(|d| (d.date.as_str(), d.condition.as_str())).collect();
        assert_eq!(picked, vec![("2024-06-01", "a1"), ("2024-06-02", "b2"), ("2024-06-03", "c1")]);
    }

    #[test]
    fn test_caps_at_five_days() {
        let samples: Vec<ForecastSample> = (1..=7)
            .map(|d| sample(&format!("2024-06-0{} 12:00:00", d), d as f64, "x"))
            .collect();

        let days = aggregate_daily(&samples);
        let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"]);
    }

    #[test]
    fn test_dropped_date_does_not_return_later() {
        let samples = vec![
            sample("2024-06-01 12:00:00", 1.0, "1"),
            sample("2024-06-02 12:00:00", 2.0, "2"),
            sample("2024-06-03 12:00:00", 3.0, "3"),
            sample("2024-06-04 12:00:00", 4.0, "4"),
            sample("2024-06-05 12:00:00", 5.0, "5"),
            sample("2024-06-06 12:00:00", 6.0, "6"),
            sample("2024-06-01 15:00:00", 7.0, "1b"),
            sample("2024-06-06 15:00:00", 8.0, "6b"),
        ];

        let days = aggregate_daily(&samples);
        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|d| d.date != "2024-06-06"));
        assert_eq!(days[0].condition, "1");
    }

    #[test]
    fn test_missing_timestamp_is_skipped() {
        let samples = vec![ForecastSample { timestamp_text: None, temp_max: Some(10.0), ..Default::default() }];
        assert!(aggregate_daily(&samples).is_empty());
    }

    #[test]
    fn test_malformed_timestamps_never_group() {
        let samples = vec![
            ForecastSample { timestamp_text: Some(String::new()), ..Default::default() },
            ForecastSample { timestamp_text: Some(" 12:00:00".to_string()), ..Default::default() },
            ForecastSample { timestamp_text: Some("tomorrow 12:00:00".to_string()), ..Default::default() },
            ForecastSample { timestamp_text: Some("2024-02-30 12:00:00".to_string()), ..Default::default() },
            ForecastSample { timestamp_text: Some("2024-06-01T12:00:00".to_string()), ..Default::default() },
            sample("2024-06-01 09:00:00", 1.0, "valid"),
        ];

        let days = aggregate_daily(&samples);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition, "valid");
    }

    #[test]
    fn test_first_midday_wins() {
        let samples = vec![
            sample("2024-06-01 12:00:00", 1.0, "first"),
            sample("2024-06-01 15:00:00", 2.0, "later"),
            sample("2024-06-01 12:00:00", 3.0, "second midday"),
        ];

        let days = aggregate_daily(&samples);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition, "first");
    }

    #[test]
    fn test_unsorted_samples_group_by_first_seen() {
        let samples = vec![
            sample("2024-06-02 09:00:00", 1.0, "b1"),
            sample("2024-06-01 09:00:00", 2.0, "a1"),
            sample("2024-06-02 12:00:00", 3.0, "b2"),
        ];

        let days = aggregate_daily(&samples);
        assert_eq!(days[0].date, "2024-06-02");
        assert_eq!(days[0].condition, "b2");
        assert_eq!(days[1].date, "2024-06-01");
    }

    #[test]
    fn test_time_compared_as_text() {
        let samples = vec![
            sample("2024-06-01 09:00:00", 1.0, "first"),
            sample("2024-06-01 12:00", 2.0, "short"),
            sample("2024-06-01 12:00:00.000", 3.0, "long"),
        ];

        assert_eq!(aggregate_daily(&samples)[0].condition, "first");
    }

    #[test]
    fn test_missing_fields_default() {
        let samples = vec![ForecastSample {
            timestamp_text: Some("2024-12-25 06:00:00".to_string()),
            ..Default::default()
        }];

        let days = aggregate_daily(&samples);
        assert_eq!(
            days[0],
            DailySummary {
                date: "2024-12-25".to_string(),
                day_name: "Wednesday".to_string(),
                high: None,
                low: None,
                condition: String::new(),
                icon: String::new(),
            }
        );
    }

    #[test]
    fn test_serializes_camel_case_with_nulls() {
        let summary = DailySummary {
            date: "2024-06-01".to_string(),
            day_name: "Saturday".to_string(),
            high: None,
            low: Some(12.5),
            condition: "light rain".to_string(),
            icon: "10d".to_string(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-06-01",
                "dayName": "Saturday",
                "high": null,
                "low": 12.5,
                "condition": "light rain",
                "icon": "10d"
            })
        );
    }
}
