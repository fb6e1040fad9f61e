// tests/registry_tests.rs
mod common;

use common::*;
use fern::{ContextData, Fern, FernOptions, Method, Outcome};
use serde_json::json;

#[tokio::test]
async fn test_registry_dispatches_by_method_and_path() {
  setup_tracing();
  let mut fern = registry();
  fern.endpoint("/items", Method::Get).send(json!({"op": "list"}));
  fern.endpoint("/items", Method::Post).send(json!({"op": "create"}));
  fern.endpoint("/items", Method::Delete).send(json!({"op": "delete"}));

  assert_eq!(fern.routes(), vec!["delete:/items", "get:/items", "post:/items"]);
  assert_eq!(dispatch(&fern, Method::Get, "/items").await.body["op"], "list");
  assert_eq!(dispatch(&fern, Method::Post, "/items").await.body["op"], "create");
  assert_eq!(dispatch(&fern, Method::Delete, "/items").await.body["op"], "delete");
}

#[tokio::test]
async fn test_redefining_a_route_keeps_only_the_last_definition() {
  setup_tracing();
  let trail = Trail::default();
  let mut fern = registry();
  fern
    .endpoint("/dup", Method::Get)
    .use_step("first", recording_step(&trail, "first"))
    .send(json!({"version": 1}));
  fern
    .endpoint("/dup", Method::Get)
    .use_step("second", recording_step(&trail, "second"))
    .send(json!({"version": 2}));

  assert_eq!(fern.route_count(), 1);
  let res = dispatch(&fern, Method::Get, "/dup").await;
  assert_eq!(res.body, json!({"version": 2, "status": 200}));
  assert_eq!(trail.entries(), vec!["second"]);
}

#[tokio::test]
async fn test_each_builder_call_appends_one_step() {
  setup_tracing();
  let mut fern = registry();
  fern
    .endpoint("/chain", Method::Post)
    .map_body_strict(["a"])
    .use_body(Some(|_ctx: ContextData| Outcome::Continue))
    .map_db(vec![json!("t")])
    .use_db(|_ctx: ContextData| async move { Ok(true) })
    .use_step("custom", |_ctx: ContextData| Outcome::Continue)
    .send(json!({}));

  let pipeline = fern.route(Method::Post, "/chain").unwrap();
  assert_eq!(pipeline.key(), "post:/chain");
  assert_eq!(
    pipeline.step_labels(),
    vec!["bootstrap", "map_body_strict", "use_body", "map_db", "use_db", "custom", "send"]
  );
}

#[tokio::test]
async fn test_endpoint_alone_registers_bootstrap_step() {
  setup_tracing();
  let mut fern = Fern::new(FernOptions::default());
  let builder = fern.endpoint("/bare", Method::Get);
  assert_eq!(builder.key(), "get:/bare");
  builder.finish();

  let pipeline = fern.route(Method::Get, "/bare").unwrap();
  assert_eq!(pipeline.len(), 1);
  assert!(fern.route(Method::Post, "/bare").is_none());
}
