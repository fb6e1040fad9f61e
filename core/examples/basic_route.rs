// fern/examples/basic_route.rs

use fern::{ContextData, Fern, FernOptions, Method, Outcome, RawRequest};
use serde_json::json;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), fern::FernError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Route Example ---");

  let mut fern = Fern::new(FernOptions::default().with_request_timeout(Duration::from_secs(2)));

  // 1. A route whose last step sends the payload.
  fern
    .endpoint("/greetings", Method::Post)
    .map_body_strict(["name"])
    .use_body(Some(|ctx: ContextData| {
      let name = ctx.read().body_field("name").and_then(|v| v.as_str()).map(str::to_owned);
      match name {
        Some(name) if !name.trim().is_empty() => Outcome::Continue,
        _ => Outcome::fail(422, "name must not be blank"),
      }
    }))
    .map_db(vec![json!("greetings")])
    .use_db(|ctx: ContextData| async move {
      let table = ctx.read().db.clone().unwrap_or_default();
      tokio::time::sleep(Duration::from_millis(10)).await;
      info!(?table, "Pretending to insert a greeting.");
      Ok(true)
    })
    .send(json!({"message": "Greeting stored"}));

  // 2. Dispatch a few requests the way a driver would.
  let requests = [
    RawRequest::new(Method::Post, "/greetings").with_body(json!({"name": "Ada"})),
    RawRequest::new(Method::Post, "/greetings").with_body(json!({"name": "  "})),
    RawRequest::new(Method::Post, "/greetings").with_body(json!({})),
    RawRequest::new(Method::Post, "/greetings"),
  ];

  for request in requests {
    match fern.dispatch(request).await? {
      Some(res) => info!(status = res.status, body = %res.body, "Response"),
      None => info!("No response was sent."),
    }
  }

  Ok(())
}
