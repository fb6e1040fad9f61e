// fern/src/steps/database.rs

use crate::core::{ContextData, Outcome, StepFn};
use serde_json::Value;
use std::future::Future;
use tracing::{event, Level};

/// Leaves `args` in `Context::db` for a later [`use_db`] step. Always continues.
pub fn map_db(args: Vec<Value>) -> StepFn {
  Box::new(move |ctx: ContextData| {
    ctx.write().db = Some(args.clone());
    Outcome::Continue
  })
}

/// Runs an external asynchronous operation. `Ok(true)` continues; `Ok(false)` and
/// any error become the generic 500 failure. Errors are logged, never propagated.
pub fn use_db<F, Fut>(operation: F) -> StepFn
where
  F: Fn(ContextData) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
  Box::new(move |ctx: ContextData| {
    let pending = operation(ctx);
    Outcome::deferred(async move {
      match pending.await {
        Ok(ok) => Outcome::from(ok),
        Err(e) => {
          event!(Level::ERROR, error = ?e, "Database operation failed.");
          Outcome::from(false)
        }
      }
    })
  })
}
