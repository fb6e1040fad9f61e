// fern/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FernError {
  #[error("No route registered for '{key}'")]
  RouteNotFound { key: String },

  #[error("Unsupported method: {0}")]
  UnsupportedMethod(String),

  #[error("Unsupported driver '{driver}'")]
  UnsupportedDriver { driver: String },

  /// The finalizer already wrote a response for this request.
  #[error("Response already sent (status {status}); refusing to send {attempted}")]
  ResponseAlreadySent { status: u16, attempted: u16 },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Error in user-provided step or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal Fern error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for FernError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<FernError>() {
      Ok(fern_err) => fern_err,
      Err(source) => FernError::HandlerError { source },
    }
  }
}

pub type FernResult<T, E = FernError> = std::result::Result<T, E>;
