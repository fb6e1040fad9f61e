// fern_server/src/routes/mod.rs

//! Route definitions served by this binary.

pub mod notes;

use crate::errors::Result;
use crate::services::notes_store::NotesStore;
use fern::{Fern, FernError, FernOptions, Method};
use serde_json::json;
use std::sync::Arc;

/// The only transport this server implements.
pub const DRIVER: &str = "actix-web";

/// Builds the registry with every route defined. Fails when the options ask for a
/// driver other than this one.
pub fn build_fern(options: FernOptions, notes: Arc<NotesStore>) -> Result<Fern> {
  if options.driver != DRIVER {
    return Err(FernError::UnsupportedDriver { driver: options.driver }.into());
  }

  let mut fern = Fern::new(options);
  register_routes(&mut fern, notes);
  tracing::info!(routes = ?fern.routes(), "Routes registered.");
  Ok(fern)
}

pub fn register_routes(fern: &mut Fern, notes: Arc<NotesStore>) {
  fern.endpoint("/health", Method::Get).send(json!({ "message": "ok" }));

  notes::create_note(fern, notes.clone());
  notes::list_notes(fern, notes.clone());
  notes::delete_note(fern, notes);
  notes::legacy_create_note(fern);
}
