use actix_web::http::StatusCode;
use actix_web::{delete, get, web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::AppState;
use crate::initialization::API_KEY_VAR;
use crate::location::{LocationError, LocationParams, LocationQuery};
use crate::manager_owm::errors::OWMError;
use crate::recent_searches::RecentSearches;
use crate::render::{render_search, SearchOutcome};
use crate::units::TemperatureUnit;

#[derive(Deserialize, Debug, Default)]
struct UnitParams {
    #[serde(default)]
    unit: TemperatureUnit,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

fn error_response(status: StatusCode, error: String, details: Option<&Value>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error, details })
}

fn missing_api_key_message() -> String {
    format!("{} is not set on the server", API_KEY_VAR)
}

fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Maps a location that could not be resolved to a client error
///
/// # Arguments
///
/// * 'e' - the location error
/// * 'missing_message' - message used when no location was given at all
fn location_error_response(e: &LocationError, missing_message: &str) -> HttpResponse {
    match e {
        LocationError::Missing => error_response(StatusCode::BAD_REQUEST, missing_message.to_string(), None),
        LocationError::InvalidCoordinates { lat, lon } => error_response(
            StatusCode::BAD_REQUEST,
            format!("Coordinates out of range: lat={}, lon={}", lat, lon),
            None,
        ),
        LocationError::Geolocation(g) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, g.message().to_string(), None)
        }
    }
}

/// Maps a failed provider lookup to a response, forwarding the provider status
///
/// # Arguments
///
/// * 'e' - the provider error
/// * 'what' - what was looked up, 'weather' or 'forecast'
fn lookup_error_response(e: &OWMError, what: &str) -> HttpResponse {
    match e {
        OWMError::MissingApiKey => error_response(StatusCode::INTERNAL_SERVER_ERROR, missing_api_key_message(), None),
        OWMError::NotFound(_) | OWMError::Upstream { .. } => {
            let status = match e {
                OWMError::Upstream { status, .. } => upstream_status(*status),
                _ => StatusCode::NOT_FOUND,
            };
            error_response(status, format!("Failed to fetch {} from OpenWeatherMap", what), e.details())
        }
        OWMError::Transport(_) | OWMError::Document(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unexpected error fetching {}", what),
            None,
        ),
    }
}

/// Message shown to the user when a search fails, and the status to answer with
fn search_failure(e: &OWMError) -> (StatusCode, String) {
    match e {
        OWMError::MissingApiKey => (StatusCode::INTERNAL_SERVER_ERROR, missing_api_key_message()),
        OWMError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            "City not found. Check spelling and try again.".to_string(),
        ),
        OWMError::Upstream { status, .. } => (
            upstream_status(*status),
            "Could not fetch weather data. Please try again.".to_string(),
        ),
        OWMError::Transport(_) | OWMError::Document(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unexpected error fetching weather.".to_string(),
        ),
    }
}

const LOCATION_REQUIRED: &str = "City query parameter is required, e.g. ?city=Amman (or ?lat=..&lon=..)";

// city=Amman or lat=31.95&lon=35.93
#[get("/api/weather")]
async fn weather(params: web::Query<LocationParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let location = match params.resolve() {
        Ok(l) => l,
        Err(e) => return location_error_response(&e, LOCATION_REQUIRED),
    };

    match data.owm.current_weather(&location).await {
        Ok(current) => HttpResponse::Ok().json(current),
        Err(e) => {
            error!("failed to get weather for {}: {}", location, e);
            lookup_error_response(&e, "weather")
        }
    }
}

#[get("/api/forecast")]
async fn forecast(params: web::Query<LocationParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let location = match params.resolve() {
        Ok(l) => l,
        Err(e) => return location_error_response(&e, LOCATION_REQUIRED),
    };

    match data.owm.daily_forecast(&location).await {
        Ok(days) => HttpResponse::Ok().json(days),
        Err(e) => {
            error!("failed to get forecast for {}: {}", location, e);
            lookup_error_response(&e, "forecast")
        }
    }
}

/// Full user search: current conditions, then the daily forecast, rendered for display.
///
/// A failing forecast leaves the search successful with an empty forecast. The outcome
/// is put on display unless a search started later has already finished.
#[get("/api/search")]
async fn search(
    params: web::Query<LocationParams>,
    unit: web::Query<UnitParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!("{:?} {:?}", params, unit);

    let location = match params.resolve() {
        Ok(l) => l,
        Err(e) => return location_error_response(&e, "Please enter a city name."),
    };

    let ticket = data.session.begin();
    let (status, outcome) = run_search(&location, unit.unit, &data).await;

    if !data.session.commit(ticket, outcome.clone()).await {
        info!("search for {} was superseded by a newer search", location);
    }

    HttpResponse::build(status).json(outcome)
}

async fn run_search(location: &LocationQuery, unit: TemperatureUnit, data: &AppState) -> (StatusCode, SearchOutcome) {
    let current = match data.owm.current_weather(location).await {
        Ok(c) => c,
        Err(e) => {
            warn!("search for {} failed: {}", location, e);
            let (status, message) = search_failure(&e);
            return (status, SearchOutcome::Failed { message });
        }
    };

    let days = match data.owm.daily_forecast(location).await {
        Ok(d) => d,
        Err(e) => {
            warn!("no forecast for {}, showing current weather only: {}", location, e);
            Vec::new()
        }
    };

    if let Some(city) = location.city() {
        record_search(city, data).await;
    }

    let term = location.to_string();
    (StatusCode::OK, SearchOutcome::Found(render_search(&term, &current, &days, unit)))
}

/// Adds a term to recent searches and stores them, storage failures are only logged
async fn record_search(term: &str, data: &AppState) {
    let mut recent = data.recent.lock().await;
    if recent.push(term) {
        if let Err(e) = data.db.lock().await.save_recent_searches(&recent) {
            error!("failed to store recent searches: {}", e);
        }
    }
}

#[get("/api/display")]
async fn display(data: web::Data<AppState>) -> impl Responder {
    match data.session.current().await {
        Some(outcome) => HttpResponse::Ok().json(outcome),
        None => HttpResponse::NoContent().finish(),
    }
}

#[get("/api/recent")]
async fn recent_searches(data: web::Data<AppState>) -> impl Responder {
    let recent = data.recent.lock().await;
    HttpResponse::Ok().json(&*recent)
}

#[delete("/api/recent")]
async fn clear_recent_searches(data: web::Data<AppState>) -> impl Responder {
    let mut recent = data.recent.lock().await;

    // Memory follows the database, never the other way round
    match data.db.lock().await.save_recent_searches(&RecentSearches::default()) {
        Ok(_) => {
            recent.clear();
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("failed to clear recent searches: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(weather)
        .service(forecast)
        .service(search)
        .service(display)
        .service(recent_searches)
        .service(clear_recent_searches);
}
