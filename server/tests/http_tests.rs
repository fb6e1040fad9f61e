// fern_server/tests/http_tests.rs

use actix_web::{test, web, App};
use fern::{FernOptions, GENERIC_FAILURE_MESSAGE};
use fern_server::config::AppConfig;
use fern_server::routes::build_fern;
use fern_server::services::notes_store::NotesStore;
use fern_server::state::AppState;
use fern_server::web::dispatch_handler;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn app_state(options: FernOptions) -> AppState {
  let notes = Arc::new(NotesStore::with_latency(Duration::from_millis(2)));
  let fern = build_fern(options.clone(), notes.clone()).expect("default driver is supported");
  let config = AppConfig {
    fern: options,
    ..AppConfig::default()
  };
  AppState {
    fern: Arc::new(fern),
    notes,
    config: Arc::new(config),
  }
}

macro_rules! fern_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state))
        .app_data(web::PayloadConfig::new(1024))
        .default_service(web::to(dispatch_handler)),
    )
    .await
  };
}

#[actix_web::test]
async fn health_route_sends_ok_with_status() {
  let app = fern_app!(app_state(FernOptions::default()));
  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status().as_u16(), 200);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "ok", "status": 200}));
}

#[actix_web::test]
async fn notes_can_be_created_listed_and_deleted() {
  let state = app_state(FernOptions::default());
  let notes = state.notes.clone();
  let app = fern_app!(state);

  let create = test::TestRequest::post()
    .uri("/notes")
    .set_json(json!({"title": "groceries", "content": "milk"}))
    .to_request();
  let resp = test::call_service(&app, create).await;
  assert_eq!(resp.status().as_u16(), 200);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "Note created", "status": 200}));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/notes").to_request()).await;
  assert_eq!(resp.status().as_u16(), 200);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["count"], 1);
  assert_eq!(body["notes"][0]["title"], "groceries");

  let id = notes.list().await[0].id;
  let delete = test::TestRequest::delete()
    .uri("/notes")
    .set_json(json!({ "id": id.to_string() }))
    .to_request();
  let resp = test::call_service(&app, delete).await;
  assert_eq!(resp.status().as_u16(), 200);
  assert!(notes.list().await.is_empty());

  let again = test::TestRequest::delete()
    .uri("/notes")
    .set_json(json!({ "id": id.to_string() }))
    .to_request();
  let resp = test::call_service(&app, again).await;
  assert_eq!(resp.status().as_u16(), 404);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "Note not found", "status": 404}));
}

#[actix_web::test]
async fn missing_fields_and_missing_body_are_client_errors() {
  let app = fern_app!(app_state(FernOptions::default()));

  let partial = test::TestRequest::post()
    .uri("/notes")
    .set_json(json!({"title": "only title"}))
    .to_request();
  let resp = test::call_service(&app, partial).await;
  assert_eq!(resp.status().as_u16(), 403);

  let empty = test::TestRequest::post().uri("/notes").to_request();
  let resp = test::call_service(&app, empty).await;
  assert_eq!(resp.status().as_u16(), 400);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "Invalid request", "status": 400}));
}

#[actix_web::test]
async fn database_failure_is_a_generic_500() {
  let app = fern_app!(app_state(FernOptions::default()));
  let req = test::TestRequest::post()
    .uri("/notes")
    .set_json(json!({"title": "fail_test", "content": "x"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status().as_u16(), 500);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
}

#[actix_web::test]
async fn legacy_route_always_rejects() {
  let app = fern_app!(app_state(FernOptions::default()));
  let req = test::TestRequest::post()
    .uri("/legacy/notes")
    .set_json(json!({"title": "a", "content": "b"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status().as_u16(), 403);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "Bad Request", "status": 403}));
}

#[actix_web::test]
async fn driver_errors_use_the_same_shape() {
  let app = fern_app!(app_state(FernOptions::default()));

  let resp = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
  assert_eq!(resp.status().as_u16(), 404);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], 404);

  let resp = test::call_service(&app, test::TestRequest::put().uri("/notes").to_request()).await;
  assert_eq!(resp.status().as_u16(), 405);

  let bad_json = test::TestRequest::post()
    .uri("/notes")
    .insert_header(("content-type", "application/json"))
    .set_payload("{not json")
    .to_request();
  let resp = test::call_service(&app, bad_json).await;
  assert_eq!(resp.status().as_u16(), 400);
}

#[::core::prelude::v1::test]
fn unsupported_driver_is_rejected() {
  let options = FernOptions::default().with_driver("express");
  let err = build_fern(options, Arc::new(NotesStore::new())).err().expect("driver must be rejected");
  assert!(err.to_string().contains("express"));
}
