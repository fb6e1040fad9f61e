// fern/src/pipeline/definition.rs

//! Contains the `Pipeline` struct: the ordered steps registered for one route.

use crate::core::step::{StepDef, StepFn};

/// The ordered step sequence for one `method:path` key.
///
/// Steps are only appended while the route is being defined; once the registry
/// serves requests the pipeline is shared read-only.
pub struct Pipeline {
  pub(crate) key: String,
  pub(crate) steps: Vec<StepDef>,
}

impl Pipeline {
  pub fn new(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      steps: Vec::new(),
    }
  }

  /// Appends a step at the end of the sequence.
  pub fn push_step(&mut self, label: impl Into<String>, handler: StepFn) {
    self.steps.push(StepDef::new(label, handler));
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Labels of the registered steps, in execution order.
  pub fn step_labels(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.label.as_str()).collect()
  }
}

impl std::fmt::Debug for Pipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("key", &self.key)
      .field("steps", &self.step_labels())
      .finish()
  }
}
