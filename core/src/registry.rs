// fern/src/registry.rs

//! Defines `Fern`, the route registry, and `RouteBuilder`, the fluent API used to
//! append steps to a route while it is being defined.

use crate::config::FernOptions;
use crate::core::context::{Context, RawRequest};
use crate::core::context_data::ContextData;
use crate::core::method::{route_key, Method};
use crate::core::outcome::Outcome;
use crate::core::step::StepFn;
use crate::error::{FernError, FernResult};
use crate::pipeline::Pipeline;
use crate::response::{FinalResponse, ResponseFinalizer, ResponseSlot};
use crate::steps;

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Process-wide mapping from `method:path` to the route's pipeline.
///
/// Mutated only through [`Fern::endpoint`] during route construction. Once routes
/// are defined the registry is typically wrapped in an `Arc` and only read.
#[derive(Debug, Default)]
pub struct Fern {
  options: FernOptions,
  routes: HashMap<String, Arc<Pipeline>>,
}

impl Fern {
  pub fn new(options: FernOptions) -> Self {
    Self {
      options,
      routes: HashMap::new(),
    }
  }

  pub fn options(&self) -> &FernOptions {
    &self.options
  }

  /// Starts (or restarts) the definition of `method path`.
  ///
  /// Any previous definition for the same key is discarded; the last definition
  /// wins. The new sequence starts with a bootstrap step that stamps the method on
  /// the context. The returned builder borrows the registry mutably, so one route
  /// must be finished before the next `endpoint` call.
  pub fn endpoint(&mut self, path: &str, method: Method) -> RouteBuilder<'_> {
    let key = route_key(method, path);
    if self.routes.contains_key(&key) {
      event!(Level::WARN, route = %key, "Route redefined, previous steps discarded.");
    } else {
      event!(Level::DEBUG, route = %key, "Defining route.");
    }

    let mut pipeline = Pipeline::new(key.clone());
    pipeline.push_step("bootstrap", steps::stamp_method(method));
    self.routes.insert(key.clone(), Arc::new(pipeline));

    RouteBuilder { fern: self, key }
  }

  pub fn route(&self, method: Method, path: &str) -> Option<Arc<Pipeline>> {
    self.routes.get(&route_key(method, path)).cloned()
  }

  /// Registered route keys, sorted.
  pub fn routes(&self) -> Vec<&str> {
    let mut keys: Vec<&str> = self.routes.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
  }

  pub fn route_count(&self) -> usize {
    self.routes.len()
  }

  /// Terminal dispatch callback for the transport driver.
  ///
  /// Matches the request to its route, runs the pipeline against a fresh context
  /// and returns the response the finalizer captured. `Ok(None)` means the
  /// pipeline finished without any step sending a response.
  #[instrument(
        name = "Fern::dispatch",
        skip_all,
        fields(method = ?request.method, path = %request.path),
        err(Display)
    )]
  pub async fn dispatch(&self, request: RawRequest) -> FernResult<Option<FinalResponse>> {
    let method = request
      .method
      .ok_or_else(|| FernError::Internal("request has no method".to_string()))?;
    let key = route_key(method, &request.path);
    let pipeline = self.routes.get(&key).cloned().ok_or_else(|| {
      event!(Level::DEBUG, route = %key, "No route matched.");
      FernError::RouteNotFound { key: key.clone() }
    })?;

    let slot = Arc::new(ResponseSlot::new());
    let finalizer = ResponseFinalizer::new(slot.clone());
    let ctx = ContextData::new(Context::new(request, finalizer));

    let result = match self.options.request_timeout {
      Some(timeout) => pipeline.run_with_timeout(ctx, timeout).await,
      None => pipeline.run(ctx).await,
    };
    event!(Level::DEBUG, ?result, "Request finished.");

    Ok(slot.take())
  }

  fn push(&mut self, key: &str, label: &str, handler: StepFn) -> FernResult<()> {
    let pipeline = self
      .routes
      .get_mut(key)
      .and_then(Arc::get_mut)
      .ok_or_else(|| FernError::Internal(format!("route '{}' is no longer under construction", key)))?;
    pipeline.push_step(label, handler);
    Ok(())
  }
}

/// Appends steps to the route opened by [`Fern::endpoint`].
///
/// Every method appends exactly one step and returns the builder for chaining,
/// except [`RouteBuilder::send`] and [`RouteBuilder::finish`], which end the definition.
pub struct RouteBuilder<'a> {
  fern: &'a mut Fern,
  key: String,
}

impl<'a> RouteBuilder<'a> {
  pub fn key(&self) -> &str {
    &self.key
  }

  /// Appends an arbitrary step.
  pub fn use_step<F>(self, label: &str, step: F) -> Self
  where
    F: Fn(ContextData) -> Outcome + Send + Sync + 'static,
  {
    self.append(label, Box::new(step))
  }

  /// See [`steps::map_body`].
  pub fn map_body<K: Into<String>>(self, keys: impl IntoIterator<Item = K>) -> Self {
    let keys = keys.into_iter().map(Into::into).collect();
    self.append("map_body", steps::map_body(keys))
  }

  /// See [`steps::map_body_strict`].
  pub fn map_body_strict<K: Into<String>>(self, keys: impl IntoIterator<Item = K>) -> Self {
    let keys = keys.into_iter().map(Into::into).collect();
    self.append("map_body_strict", steps::map_body_strict(keys))
  }

  pub fn use_body<F>(self, callback: Option<F>) -> Self
  where
    F: Fn(ContextData) -> Outcome + Send + Sync + 'static,
  {
    self.append("use_body", steps::use_body(callback))
  }

  pub fn map_db(self, args: Vec<Value>) -> Self {
    self.append("map_db", steps::map_db(args))
  }

  pub fn use_db<F, Fut>(self, operation: F) -> Self
  where
    F: Fn(ContextData) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
  {
    self.append("use_db", steps::use_db(operation))
  }

  /// Appends the terminal send step and ends the route definition.
  pub fn send(self, payload: impl Into<Value>) {
    self.append("send", steps::send(payload.into()));
  }

  /// Ends the route definition without a send step. The route's steps are then
  /// responsible for calling the finalizer themselves.
  pub fn finish(self) {
    event!(Level::TRACE, route = %self.key, "Route definition finished.");
  }

  fn append(self, label: &str, handler: StepFn) -> Self {
    if let Err(e) = self.fern.push(&self.key, label, handler) {
      event!(Level::ERROR, route = %self.key, error = %e, "Step not appended.");
    }
    self
  }
}
