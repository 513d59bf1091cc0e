pub mod errors;
pub mod models;

use std::time::Duration;
use log::{debug, info};
use reqwest::Client;
use crate::daily_forecast::{aggregate_daily, DailySummary, ForecastSample};
use crate::location::LocationQuery;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{CurrentConditions, CurrentResponse, FullForecast};


/// Struct for fetching current weather and forecasts from OpenWeatherMap
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OWM {
    /// Returns an OWM struct ready for fetching weather from OpenWeatherMap
    ///
    /// A missing api key is not an error here, each lookup reports it instead so the
    /// service can still start and tell its clients what is wrong.
    ///
    /// # Arguments
    ///
    /// * 'base_url' - base url of the api, e.g. https://api.openweathermap.org/data/2.5
    /// * 'api_key' - the OpenWeatherMap api key
    /// * 'timeout' - timeout for each request
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Retrieves current weather conditions for a location
    ///
    /// # Arguments
    ///
    /// * 'location' - city name or coordinates
    pub async fn current_weather(&self, location: &LocationQuery) -> Result<CurrentConditions, OWMError> {
        let json = self.request("weather", location).await?;
        let current: CurrentResponse = serde_json::from_str(&json)?;

        Ok(current.into())
    }

    /// Retrieves the raw forecast for a location, one sample every third hour for about
    /// five days
    ///
    /// # Arguments
    ///
    /// * 'location' - city name or coordinates
    pub async fn forecast_samples(&self, location: &LocationQuery) -> Result<Vec<ForecastSample>, OWMError> {
        let json = self.request("forecast", location).await?;
        let forecast: FullForecast = serde_json::from_str(&json)?;
        debug!("received {} forecast samples for {}", forecast.list.len(), location);

        Ok(forecast.list.into_iter().map(ForecastSample::from).collect())
    }

    /// Retrieves the forecast for a location reduced to one entry per day
    ///
    /// # Arguments
    ///
    /// * 'location' - city name or coordinates
    pub async fn daily_forecast(&self, location: &LocationQuery) -> Result<Vec<DailySummary>, OWMError> {
        let samples = self.forecast_samples(location).await?;

        Ok(aggregate_daily(&samples))
    }

    /// Makes a request to one of the api endpoints and returns the body of a successful
    /// response
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - endpoint name, e.g. 'weather'
    /// * 'location' - city name or coordinates
    async fn request(&self, endpoint: &str, location: &LocationQuery) -> Result<String, OWMError> {
        let api_key = self.api_key.as_deref().ok_or(OWMError::MissingApiKey)?;

        let mut query = location.query_pairs();
        query.push(("appid", api_key.to_string()));
        query.push(("units", "metric".to_string()));

        info!("requesting {} for {}", endpoint, location);
        let req = self.client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&query)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            let details = req.json::<serde_json::Value>().await.ok();
            return Err(OWMError::from_status(status.as_u16(), details));
        }

        Ok(req.text().await?)
    }
}
