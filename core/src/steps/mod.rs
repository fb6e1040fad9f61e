// fern/src/steps/mod.rs

//! Constructors for the built-in steps the route builder appends.

mod body;
mod database;

pub use body::{map_body, map_body_strict, use_body};
pub use database::{map_db, use_db};

use crate::core::{ContextData, Method, Outcome, StepFn};
use serde_json::Value;
use tracing::{event, Level};

/// Bootstrap step every route starts with: stamps the route's method on the context.
pub fn stamp_method(method: Method) -> StepFn {
  Box::new(move |ctx: ContextData| {
    ctx.write().method = Some(method);
    Outcome::Continue
  })
}

/// Sends `payload` through the success path and continues. Conventionally the last step.
pub fn send(payload: Value) -> StepFn {
  Box::new(move |ctx: ContextData| {
    if let Err(e) = ctx.response().send_ok(payload.clone()) {
      event!(Level::WARN, error = %e, "send step could not write its payload.");
    }
    Outcome::Continue
  })
}
