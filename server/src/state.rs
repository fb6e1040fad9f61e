// fern_server/src/state.rs
use crate::config::AppConfig;
use crate::services::notes_store::NotesStore;
use fern::Fern;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub fern: Arc<Fern>,
  pub notes: Arc<NotesStore>,
  pub config: Arc<AppConfig>,
}
