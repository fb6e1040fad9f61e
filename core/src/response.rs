// fern/src/response.rs

//! The response finalizer: the only thing allowed to write a request's response,
//! and only once.

use crate::error::{FernError, FernResult};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{event, Level};

/// A finished response: HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalResponse {
  pub status: u16,
  pub body: Value,
}

/// Where the finalizer writes. Implemented by the transport driver.
pub trait ResponseSink: Send + Sync {
  fn write(&self, response: FinalResponse);
}

/// In-memory sink holding at most one response; the dispatcher hands its content
/// back to the driver once the pipeline is done.
#[derive(Debug, Default)]
pub struct ResponseSlot(Mutex<Option<FinalResponse>>);

impl ResponseSlot {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn take(&self) -> Option<FinalResponse> {
    self.0.lock().take()
  }

  pub fn peek(&self) -> Option<FinalResponse> {
    self.0.lock().clone()
  }
}

impl ResponseSink for ResponseSlot {
  fn write(&self, response: FinalResponse) {
    *self.0.lock() = Some(response);
  }
}

struct FinalizerInner {
  sink: Arc<dyn ResponseSink>,
  // Status of the response already written, if any.
  sent: Mutex<Option<u16>>,
}

/// Exposes `send_ok` / `send_error`. Clones share the same "already sent" guard.
#[derive(Clone)]
pub struct ResponseFinalizer(Arc<FinalizerInner>);

impl ResponseFinalizer {
  pub fn new(sink: Arc<dyn ResponseSink>) -> Self {
    ResponseFinalizer(Arc::new(FinalizerInner {
      sink,
      sent: Mutex::new(None),
    }))
  }

  pub fn is_sent(&self) -> bool {
    self.0.sent.lock().is_some()
  }

  pub fn sent_status(&self) -> Option<u16> {
    *self.0.sent.lock()
  }

  /// Writes `payload` with `status: 200` attached at HTTP 200.
  ///
  /// Object payloads get the field injected (replacing any `status` the caller
  /// set); anything else is wrapped as `{ "data": payload, "status": 200 }`.
  pub fn send_ok(&self, payload: impl Into<Value>) -> FernResult<()> {
    let mut body = match payload.into() {
      Value::Object(map) => map,
      other => {
        let mut map = Map::new();
        map.insert("data".to_string(), other);
        map
      }
    };
    body.insert("status".to_string(), Value::from(200u16));

    self.finalize(200, || event!(Level::INFO, status = 200, "Send => 200"), body)
  }

  /// Writes `{ message, stack? , status: code }` at HTTP `code`. `stack` is only
  /// present in the body when provided.
  pub fn send_error(&self, code: u16, message: &str, stack: Option<Value>) -> FernResult<()> {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::from(message));
    if let Some(stack) = stack {
      body.insert("stack".to_string(), stack);
    }
    body.insert("status".to_string(), Value::from(code));

    self.finalize(
      code,
      || event!(Level::INFO, status = code, error_message = %message, "Send => {} {}", code, message),
      body,
    )
  }

  fn finalize(&self, status: u16, log: impl FnOnce(), body: Map<String, Value>) -> FernResult<()> {
    let mut sent = self.0.sent.lock();
    if let Some(previous) = *sent {
      event!(
        Level::WARN,
        previous_status = previous,
        attempted_status = status,
        "Response already sent, dropping second write."
      );
      return Err(FernError::ResponseAlreadySent {
        status: previous,
        attempted: status,
      });
    }
    log();
    *sent = Some(status);
    self.0.sink.write(FinalResponse {
      status,
      body: Value::Object(body),
    });
    Ok(())
  }
}

impl std::fmt::Debug for ResponseFinalizer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ResponseFinalizer")
      .field("sent_status", &self.sent_status())
      .finish()
  }
}
