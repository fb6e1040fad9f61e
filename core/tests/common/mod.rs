// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use fern::{ContextData, Fern, FernOptions, FinalResponse, Method, Outcome, RawRequest};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use tracing::Level;

// --- Execution trail shared between test steps ---
#[derive(Clone, Debug, Default)]
pub struct Trail(Arc<Mutex<Vec<String>>>);

impl Trail {
  pub fn record(&self, label: &str) {
    self.0.lock().unwrap().push(label.to_string());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().unwrap().clone()
  }
}

// --- Common Step Creators ---
pub fn recording_step(trail: &Trail, label: &'static str) -> impl Fn(ContextData) -> Outcome + Send + Sync + 'static {
  let trail = trail.clone();
  move |_ctx: ContextData| {
    trail.record(label);
    Outcome::Continue
  }
}

pub fn failing_step(
  trail: &Trail,
  label: &'static str,
  code: u16,
  message: &'static str,
) -> impl Fn(ContextData) -> Outcome + Send + Sync + 'static {
  let trail = trail.clone();
  move |_ctx: ContextData| {
    trail.record(label);
    Outcome::fail(code, message)
  }
}

/// A step that continues only after sleeping `delay_ms`.
pub fn deferred_step(trail: &Trail, label: &'static str, delay_ms: u64) -> impl Fn(ContextData) -> Outcome + Send + Sync + 'static {
  let trail = trail.clone();
  move |_ctx: ContextData| {
    let trail = trail.clone();
    Outcome::deferred(async move {
      tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
      trail.record(label);
      Outcome::Continue
    })
  }
}

pub fn registry() -> Fern {
  Fern::new(FernOptions::default())
}

pub async fn dispatch(fern: &Fern, method: Method, path: &str) -> FinalResponse {
  fern
    .dispatch(RawRequest::new(method, path))
    .await
    .expect("route should exist")
    .expect("pipeline should send a response")
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
