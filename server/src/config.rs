// fern_server/src/config.rs

use crate::errors::{Result, ServerError};
use dotenvy::dotenv;
use fern::FernOptions;
use std::env;
use std::time::Duration;

/// Listening port when `SERVER_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;
/// Request body limit when `FERN_JSON_LIMIT_BYTES` is not set (15 MiB).
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 15 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub json_limit_bytes: usize,
  /// Emit logs as JSON lines (`LOG_FORMAT=json`).
  pub log_json: bool,
  pub fern: FernOptions,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "0.0.0.0".to_string(),
      server_port: DEFAULT_PORT,
      json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
      log_json: false,
      fern: FernOptions::default(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let defaults = Self::default();

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_or("SERVER_PORT", get_env("SERVER_PORT"), defaults.server_port)?;
    let json_limit_bytes = parse_or("FERN_JSON_LIMIT_BYTES", get_env("FERN_JSON_LIMIT_BYTES"), defaults.json_limit_bytes)?;
    let log_json = get_env("LOG_FORMAT").map_or(false, |f| f.eq_ignore_ascii_case("json"));

    let mut fern = defaults.fern;
    fern.use_json = parse_or("FERN_USE_JSON", get_env("FERN_USE_JSON"), fern.use_json)?;
    if let Some(driver) = get_env("FERN_DRIVER") {
      fern.driver = driver;
    }
    if let Some(raw) = get_env("FERN_REQUEST_TIMEOUT_MS") {
      let millis: u64 = parse_or("FERN_REQUEST_TIMEOUT_MS", Some(raw), 0)?;
      fern.request_timeout = (millis > 0).then(|| Duration::from_millis(millis));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      json_limit_bytes,
      log_json,
      fern,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_or<T>(var_name: &str, raw: Option<String>, default: T) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match raw {
    None => Ok(default),
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| ServerError::Config(format!("Invalid {}: {}", var_name, e))),
  }
}
