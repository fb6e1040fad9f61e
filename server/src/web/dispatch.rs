// fern_server/src/web/dispatch.rs

//! The actix-web driver: every request lands here and is handed to the registry.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use fern::{FinalResponse, Method, RawRequest};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{instrument, warn};

use crate::errors::{Result, ServerError};
use crate::state::AppState;

/// Parses the raw body as JSON. Empty bodies, and every body when JSON parsing is
/// disabled, leave the request without a body.
fn parse_body(payload: &[u8], use_json: bool) -> Result<Option<Value>> {
  if !use_json || payload.iter().all(u8::is_ascii_whitespace) {
    return Ok(None);
  }
  Ok(Some(serde_json::from_slice(payload)?))
}

fn into_raw_request(req: &HttpRequest, method: Method, body: Option<Value>) -> RawRequest {
  let mut raw = RawRequest::new(method, req.path());
  raw.body = body;
  for (name, value) in req.headers() {
    if let Ok(value) = value.to_str() {
      raw.headers.insert(name.as_str().to_string(), value.to_string());
    }
  }
  raw.query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
    .map(web::Query::into_inner)
    .unwrap_or_default();
  raw
}

fn into_http_response(res: FinalResponse) -> HttpResponse {
  let status = StatusCode::from_u16(res.status).unwrap_or_else(|_| {
    warn!(status = res.status, "Pipeline produced an invalid status code.");
    StatusCode::INTERNAL_SERVER_ERROR
  });
  HttpResponse::build(status).json(res.body)
}

/// Default service: matches nothing itself, the registry does the routing.
#[instrument(name = "handler::dispatch", skip_all, fields(method = %req.method(), path = %req.path()))]
pub async fn dispatch_handler(
  req: HttpRequest,
  payload: web::Bytes,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
  let method: Method = req.method().as_str().parse()?;
  let body = parse_body(&payload, app_state.fern.options().use_json)?;
  let raw = into_raw_request(&req, method, body);

  match app_state.fern.dispatch(raw).await? {
    Some(res) => Ok(into_http_response(res)),
    None => Err(ServerError::NoResponse),
  }
}
