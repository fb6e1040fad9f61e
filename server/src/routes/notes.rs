// fern_server/src/routes/notes.rs

use crate::services::notes_store::NotesStore;
use fern::{Context, ContextData, Fern, Method, Outcome};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

fn body_str(ctx: &Context, key: &str) -> Option<String> {
  ctx.body_field(key).and_then(Value::as_str).map(str::to_owned)
}

fn require_text_fields(ctx: ContextData) -> Outcome {
  let guard = ctx.read();
  match (body_str(&guard, "title"), body_str(&guard, "content")) {
    (Some(title), Some(_)) if !title.trim().is_empty() => Outcome::Continue,
    _ => Outcome::fail(422, "title and content must be strings, title must not be blank"),
  }
}

/// `POST /notes`
pub fn create_note(fern: &mut Fern, store: Arc<NotesStore>) {
  fern
    .endpoint("/notes", Method::Post)
    .map_body_strict(["title", "content"])
    .use_body(Some(require_text_fields))
    .map_db(vec![json!("notes"), json!("insert")])
    .use_db(move |ctx: ContextData| {
      let store = store.clone();
      async move {
        let (title, content) = {
          let guard = ctx.read();
          (body_str(&guard, "title"), body_str(&guard, "content"))
        }; // guard dropped before the store call
        let (Some(title), Some(content)) = (title, content) else {
          warn!("Body fields vanished between steps.");
          return Ok(false);
        };
        let note = store.insert(&title, &content).await?;
        info!(note_id = %note.id, "Note created.");
        Ok(true)
      }
    })
    .send(json!({ "message": "Note created" }));
}

/// `GET /notes`. The database step answers with the notes itself.
pub fn list_notes(fern: &mut Fern, store: Arc<NotesStore>) {
  fern
    .endpoint("/notes", Method::Get)
    .map_db(vec![json!("notes"), json!("list")])
    .use_db(move |ctx: ContextData| {
      let store = store.clone();
      async move {
        let notes = store.list().await;
        let count = notes.len();
        ctx.response().send_ok(json!({ "notes": notes, "count": count }))?;
        Ok(true)
      }
    })
    .finish();
}

/// `DELETE /notes` with `{ "id": "<uuid>" }`.
pub fn delete_note(fern: &mut Fern, store: Arc<NotesStore>) {
  fern
    .endpoint("/notes", Method::Delete)
    .map_body_strict(["id"])
    .use_step("delete_note", move |ctx: ContextData| {
      let id = {
        let guard = ctx.read();
        body_str(&guard, "id").and_then(|raw| Uuid::parse_str(&raw).ok())
      };
      let Some(id) = id else {
        return Outcome::fail(422, "id must be a UUID");
      };
      let store = store.clone();
      Outcome::deferred(async move {
        if store.delete(id).await {
          Outcome::Continue
        } else {
          Outcome::fail(404, "Note not found")
        }
      })
    })
    .send(json!({ "message": "Note deleted" }));
}

/// `POST /legacy/notes`, mapped with the reference body rule, which never lets
/// the request through.
pub fn legacy_create_note(fern: &mut Fern) {
  fern
    .endpoint("/legacy/notes", Method::Post)
    .map_body(["title", "content"])
    .send(json!({ "message": "Note created" }));
}
