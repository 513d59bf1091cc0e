mod errors;
mod logging;
mod initialization;
mod handlers;
mod daily_forecast;
mod icons;
mod location;
mod manager_db;
mod manager_owm;
mod recent_searches;
mod render;
mod search_session;
mod units;

use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::{info, warn};
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::errors::DBError;
use crate::manager_db::DB;
use crate::manager_owm::OWM;
use crate::recent_searches::RecentSearches;
use crate::render::SearchOutcome;
use crate::search_session::SearchSession;

pub struct AppState {
    pub owm: OWM,
    pub db: Mutex<DB>,
    pub recent: Mutex<RecentSearches>,
    pub session: SearchSession<SearchOutcome>,
}

impl AppState {
    /// Creates the shared state, restoring recent searches from the database
    ///
    /// # Arguments
    ///
    /// * 'owm' - OpenWeatherMap client
    /// * 'db' - database holding recent searches
    pub fn new(owm: OWM, db: DB) -> Result<Self, DBError> {
        let recent = db.load_recent_searches()?;

        Ok(Self {
            owm,
            db: Mutex::new(db),
            recent: Mutex::new(recent),
            session: SearchSession::new(),
        })
    }
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    if config.open_weather.api_key.is_none() {
        warn!("no api key configured, lookups will fail until {} is set", initialization::API_KEY_VAR);
    }

    let owm = OWM::new(
        &config.open_weather.base_url,
        config.open_weather.api_key.clone(),
        config.open_weather.timeout,
    )?;
    let db = DB::new(&config.db.db_path)?;
    let data = web::Data::new(AppState::new(owm, db)?);

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(handlers::configure)
    })
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
