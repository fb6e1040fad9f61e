// fern/src/core/context.rs

//! Per-request scratch state shared by a route's steps.

use crate::core::method::Method;
use crate::response::ResponseFinalizer;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The transport's view of the inbound request. The body has already been parsed
/// as JSON by the driver; `None` means the request carried no body.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
  pub method: Option<Method>,
  pub path: String,
  pub headers: HashMap<String, String>,
  pub query: HashMap<String, String>,
  pub body: Option<Value>,
}

impl RawRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method: Some(method),
      path: path.into(),
      ..Default::default()
    }
  }

  pub fn with_body(mut self, body: Value) -> Self {
    self.body = Some(body);
    self
  }

  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.insert(name.into().to_ascii_lowercase(), value.into());
    self
  }

  pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.query.insert(name.into(), value.into());
    self
  }
}

/// One instance per in-flight request, created fresh by the dispatcher.
///
/// `body`, `params`, `store`, `header` and `db` start out `None` and are only
/// populated by the steps responsible for them.
#[derive(Debug)]
pub struct Context {
  /// Stamped by the route's bootstrap step.
  pub method: Option<Method>,
  pub request: RawRequest,
  pub response: ResponseFinalizer,

  pub body: Option<Map<String, Value>>,
  pub params: Option<Map<String, Value>>,
  pub store: Option<Map<String, Value>>,
  pub header: Option<Map<String, Value>>,

  /// Arguments left by a `map_db` step for a later `use_db` step.
  pub db: Option<Vec<Value>>,
}

impl Context {
  pub fn new(request: RawRequest, response: ResponseFinalizer) -> Self {
    Self {
      method: None,
      request,
      response,
      body: None,
      params: None,
      store: None,
      header: None,
      db: None,
    }
  }

  /// Shortcut for a field mapped into `body`.
  pub fn body_field(&self, key: &str) -> Option<&Value> {
    self.body.as_ref().and_then(|body| body.get(key))
  }

  pub fn response_sent(&self) -> bool {
    self.response.is_sent()
  }
}
