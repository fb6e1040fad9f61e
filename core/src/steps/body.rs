// fern/src/steps/body.rs

use crate::core::{Context, ContextData, Outcome, StepFn};
use serde_json::Value;
use tracing::{event, Level};

/// Copies every key of `keys` found in the raw request body into `Context::body`.
/// Returns `None` when the request has no usable body, else the number of matches.
/// `Context::body` stays `None` until at least one key matched.
fn copy_keys(ctx: &mut Context, keys: &[String]) -> Option<usize> {
  let Context { request, body, .. } = ctx;
  let raw = match request.body.as_ref() {
    None | Some(Value::Null) => return None,
    Some(raw) => raw,
  };

  let mut matches = 0;
  if let Value::Object(fields) = raw {
    for key in keys {
      if let Some(value) = fields.get(key) {
        body.get_or_insert_with(Default::default).insert(key.clone(), value.clone());
        matches += 1;
      }
    }
  }
  Some(matches)
}

/// Body mapping with the reference acceptance rule.
///
/// Populates `Context::body` from the request, then fails: 400 "Invalid request"
/// without a body, 403 "Bad Request" otherwise, even when every key matched.
/// Routes that need to continue past a body mapping use [`map_body_strict`].
pub fn map_body(keys: Vec<String>) -> StepFn {
  Box::new(move |ctx: ContextData| {
    let mut guard = ctx.write();
    let Some(matches) = copy_keys(&mut guard, &keys) else {
      return Outcome::fail(400, "Invalid request");
    };
    event!(
      Level::DEBUG,
      matched = matches,
      expected = keys.len(),
      all_but_one = keys.len().checked_sub(1) == Some(matches),
      "Body mapped."
    );
    Outcome::fail(403, "Bad Request")
  })
}

/// Body mapping that continues only when every key is present in the request body.
pub fn map_body_strict(keys: Vec<String>) -> StepFn {
  Box::new(move |ctx: ContextData| {
    let mut guard = ctx.write();
    match copy_keys(&mut guard, &keys) {
      None => Outcome::fail(400, "Invalid request"),
      Some(matches) if matches == keys.len() => Outcome::Continue,
      Some(matches) => {
        event!(Level::DEBUG, matched = matches, expected = keys.len(), "Request body is missing fields.");
        Outcome::fail(403, "Bad Request")
      }
    }
  })
}

/// Runs `callback` against the mapped context, or simply continues without one.
pub fn use_body<F>(callback: Option<F>) -> StepFn
where
  F: Fn(ContextData) -> Outcome + Send + Sync + 'static,
{
  Box::new(move |ctx: ContextData| match &callback {
    Some(cb) => cb(ctx),
    None => Outcome::Continue,
  })
}
