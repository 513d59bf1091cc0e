use std::fs;
use std::time::Duration;
use clap::Parser;
use log::{info, LevelFilter};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, DurationSeconds};
use crate::errors::ConfigError;
use crate::logging::setup_logger;

/// Environment variable holding the OpenWeatherMap api key
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Weather lookup service, proxies OpenWeatherMap
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[serde_as]
#[derive(Deserialize)]
pub struct OpenWeather {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

#[derive(Deserialize)]
pub struct DB {
    pub db_path: String,
}

#[serde_as]
#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    #[serde_as(as = "DisplayFromStr")]
    pub log_level: LevelFilter,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServer,
    pub open_weather: OpenWeather,
    pub db: DB,
    pub general: General,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Loads configuration and sets up logging
///
/// The config file path is taken from the command line. The api key in the environment,
/// possibly loaded from a .env file, overrides any key in the config file.
pub fn config() -> Result<Config, ConfigError> {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();

    let mut config = load_config(&args.config)?;
    apply_api_key(&mut config, std::env::var(API_KEY_VAR).ok());

    setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;

    info!("configuration loaded from {}", args.config);
    if let Ok(path) = dotenv {
        info!("environment loaded from {}", path.display());
    }

    Ok(config)
}

/// Reads and parses the config file
///
/// # Arguments
///
/// * 'config_path' - path to the toml config file
fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(toml)?)
}

/// Sets the api key from the environment if present, blank keys count as absent
///
/// # Arguments
///
/// * 'config' - configuration to update
/// * 'env_key' - value of the api key environment variable
fn apply_api_key(config: &mut Config, env_key: Option<String>) {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        config.open_weather.api_key = Some(key);
    }
    if config.open_weather.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        config.open_weather.api_key = None;
    }
}
