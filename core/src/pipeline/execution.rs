// fern/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which drives a route's steps against one request context.

use crate::core::context_data::ContextData;
use crate::core::outcome::{Failure, Outcome, PipelineResult};
use crate::pipeline::definition::Pipeline;
use futures_util::FutureExt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{event, instrument, Instrument, Level};

pub const TIMEOUT_STATUS: u16 = 504;
pub const TIMEOUT_MESSAGE: &str = "FernError: Request timed out";

impl Pipeline {
  /// Executes the steps in registration order against `ctx_data`.
  ///
  /// - `Continue` advances immediately.
  /// - `Fail` stops the run and sends the failure through the error path.
  /// - `Deferred` suspends this request until the future resolves, then the
  ///   resolved value is handled the same way.
  ///
  /// A step that panics, synchronously or while deferred, counts as the generic
  /// 500 failure. No step is invoked once the response has been sent.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(route = %self.key, num_steps = self.steps.len())
    )]
  pub async fn run(&self, ctx_data: ContextData) -> PipelineResult {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let response = ctx_data.response();

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      if response.is_sent() {
        event!(
          Level::DEBUG,
          skipped = self.steps.len() - step_idx,
          "Response already sent, remaining steps skipped."
        );
        break;
      }

      let step_span = tracing::info_span!("pipeline_step", step = %step_def.label, step_index = step_idx);

      let first = {
        let _guard = step_span.enter();
        let handler = &step_def.handler;
        let ctx = ctx_data.clone();
        panic::catch_unwind(AssertUnwindSafe(move || handler(ctx))).unwrap_or_else(|_| {
          event!(Level::ERROR, "Step panicked.");
          Outcome::generic_failure()
        })
      };

      match resolve(first).instrument(step_span.clone()).await {
        None => {
          let _guard = step_span.enter();
          event!(Level::TRACE, "Step continued.");
        }
        Some(failure) => {
          let _guard = step_span.enter();
          event!(Level::INFO, code = failure.code, reason = %failure.message, "Step failed, halting pipeline.");
          let code = failure.code;
          if let Err(e) = response.send_error(failure.code, &failure.message, failure.stack) {
            event!(Level::ERROR, error = %e, "Failure could not be delivered.");
          }
          return PipelineResult::Failed { code };
        }
      }
    }

    if !response.is_sent() {
      event!(Level::ERROR, "Pipeline completed without sending a response.");
    } else {
      event!(Level::DEBUG, "Pipeline execution completed.");
    }
    PipelineResult::Completed
  }

  /// Like [`Pipeline::run`], bounded by `timeout`.
  ///
  /// When the time elapses the run is dropped, cancelling whichever deferred step
  /// was in flight, and a 504 is sent unless a response already went out.
  pub async fn run_with_timeout(&self, ctx_data: ContextData, timeout: Duration) -> PipelineResult {
    let response = ctx_data.response();
    match tokio::time::timeout(timeout, self.run(ctx_data)).await {
      Ok(result) => result,
      Err(_) => {
        event!(Level::WARN, route = %self.key, timeout_ms = timeout.as_millis() as u64, "Pipeline timed out.");
        if !response.is_sent() {
          if let Err(e) = response.send_error(TIMEOUT_STATUS, TIMEOUT_MESSAGE, None) {
            event!(Level::ERROR, error = %e, "Timeout response could not be delivered.");
          }
        }
        PipelineResult::TimedOut
      }
    }
  }
}

/// Awaits deferred outcomes until a terminal one appears. `None` means continue.
async fn resolve(mut outcome: Outcome) -> Option<Failure> {
  loop {
    match outcome {
      Outcome::Continue => return None,
      Outcome::Fail(failure) => return Some(failure),
      Outcome::Deferred(pending) => {
        outcome = match AssertUnwindSafe(pending).catch_unwind().await {
          Ok(next) => next,
          Err(_) => {
            event!(Level::ERROR, "Deferred step panicked.");
            Outcome::generic_failure()
          }
        };
      }
    }
  }
}
