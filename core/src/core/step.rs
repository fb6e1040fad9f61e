// fern/src/core/step.rs

//! Defines a single step of a route pipeline.

use super::{ContextData, Outcome};

/// A unit of pipeline logic: takes the request's context handle and reports an [`Outcome`].
///
/// Steps run synchronously up to the point where they return; anything that must
/// wait (I/O, a database call) is returned as `Outcome::Deferred`.
pub type StepFn = Box<dyn Fn(ContextData) -> Outcome + Send + Sync>;

/// A registered step: the handler plus a label used in tracing spans.
pub struct StepDef {
  pub label: String,
  pub handler: StepFn,
}

impl StepDef {
  pub fn new(label: impl Into<String>, handler: StepFn) -> Self {
    Self {
      label: label.into(),
      handler,
    }
  }
}

// StepFn doesn't implement Debug.
impl std::fmt::Debug for StepDef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef").field("label", &self.label).finish()
  }
}
