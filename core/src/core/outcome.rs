// fern/src/core/outcome.rs

//! Defines what a step reports back to the executor, and the outcome of a full pipeline run.

use futures_util::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Message used whenever a step fails without saying why (a `false` result, a
/// caught fault, a panic).
pub const GENERIC_FAILURE_MESSAGE: &str = "FernError: Function failed";

/// An explicit failure reported by a step. Delivered verbatim by the finalizer's error path.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
  pub code: u16,
  pub message: String,
  pub stack: Option<Value>,
}

impl Failure {
  pub fn new(code: u16, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
      stack: None,
    }
  }

  pub fn with_stack(mut self, stack: impl Into<Value>) -> Self {
    self.stack = Some(stack.into());
    self
  }

  pub fn generic() -> Self {
    Self::new(500, GENERIC_FAILURE_MESSAGE)
  }
}

/// The value a step produces.
pub enum Outcome {
  /// Proceed to the next step.
  Continue,
  /// Abort the pipeline and deliver an error response.
  Fail(Failure),
  /// Not known yet. The executor suspends this request until the future resolves,
  /// then applies the same rules to the resolved value.
  Deferred(BoxFuture<'static, Outcome>),
}

impl Outcome {
  pub fn fail(code: u16, message: impl Into<String>) -> Self {
    Outcome::Fail(Failure::new(code, message))
  }

  pub fn generic_failure() -> Self {
    Outcome::Fail(Failure::generic())
  }

  pub fn deferred<F>(fut: F) -> Self
  where
    F: Future<Output = Outcome> + Send + 'static,
  {
    Outcome::Deferred(Box::pin(fut))
  }

  pub fn is_continue(&self) -> bool {
    matches!(self, Outcome::Continue)
  }
}

/// `true` continues; `false` is the generic 500 failure.
impl From<bool> for Outcome {
  fn from(ok: bool) -> Self {
    if ok {
      Outcome::Continue
    } else {
      Outcome::generic_failure()
    }
  }
}

impl From<Failure> for Outcome {
  fn from(failure: Failure) -> Self {
    Outcome::Fail(failure)
  }
}

impl fmt::Debug for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::Continue => f.write_str("Continue"),
      Outcome::Fail(failure) => f.debug_tuple("Fail").field(failure).finish(),
      Outcome::Deferred(_) => f.write_str("Deferred(..)"),
    }
  }
}

/// How a full pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran (or a response was already sent and the rest were skipped).
  Completed,
  /// A step failed; the error response carried `code`.
  Failed { code: u16 },
  /// The per-request timeout elapsed before the pipeline finished.
  TimedOut,
}
