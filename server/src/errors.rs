// fern_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use fern::FernError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Invalid JSON body: {0}")]
  InvalidJson(#[from] serde_json::Error),

  #[error("{source}")]
  Fern {
    #[from]
    source: FernError,
  },

  /// The route's pipeline finished without any step sending a response.
  #[error("FernError: No response was sent")]
  NoResponse,
}

impl ResponseError for ServerError {
  fn status_code(&self) -> StatusCode {
    match self {
      ServerError::InvalidJson(_) => StatusCode::BAD_REQUEST,
      ServerError::Fern { source } => match source {
        FernError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        FernError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ServerError::Config(_) | ServerError::NoResponse => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  // Same `{message, status}` shape the finalizer writes.
  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(server_error = %self, "Responding with error");
    } else {
      tracing::info!(server_error = %self, "Send => {}", status.as_u16());
    }
    let message = match self {
      ServerError::Fern {
        source: FernError::RouteNotFound { .. },
      } => "Not found".to_string(),
      other => other.to_string(),
    };
    HttpResponse::build(status).json(json!({ "message": message, "status": status.as_u16() }))
  }
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;
