// fern_server/src/main.rs

use fern_server::config::AppConfig;
use fern_server::routes::build_fern;
use fern_server::services::notes_store::NotesStore;
use fern_server::state::AppState;
use fern_server::web::dispatch_handler;

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let json_logs = std::env::var("LOG_FORMAT").map_or(false, |f| f.eq_ignore_ascii_case("json"));
  init_tracing(json_logs);

  tracing::info!("Starting Fern server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  let notes = Arc::new(NotesStore::new());
  let fern = match build_fern(app_config.fern.clone(), notes.clone()) {
    Ok(fern) => Arc::new(fern),
    Err(e) => {
      tracing::error!(error = %e, "Failed to build routes.");
      panic!("Route setup error: {}", e);
    }
  };

  let app_state = AppState {
    fern,
    notes,
    config: app_config.clone(),
  };

  let server_address = app_config.bind_address();
  let json_limit = app_config.json_limit_bytes;
  tracing::info!(">> Server is listening at {}", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .app_data(web::PayloadConfig::new(json_limit))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .default_service(web::to(dispatch_handler))
  })
  .bind(&server_address)?
  .run()
  .await
}
