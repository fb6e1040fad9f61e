// fern_server/src/services/notes_store.rs

//! In-memory stand-in for the database the demonstration routes talk to.

use crate::models::Note;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct NotesStore {
  notes: RwLock<Vec<Note>>,
  latency: Duration,
}

impl NotesStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Every operation sleeps `latency` first to behave like a remote database.
  pub fn with_latency(latency: Duration) -> Self {
    Self {
      notes: RwLock::new(Vec::new()),
      latency,
    }
  }

  async fn simulate_latency(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }

  #[instrument(name = "notes_store::insert", skip(self, content))]
  pub async fn insert(&self, title: &str, content: &str) -> anyhow::Result<Note> {
    self.simulate_latency().await;
    if title.to_lowercase().contains("fail_test") {
      tracing::warn!("Simulated insert failure for title: {}", title);
      anyhow::bail!("Simulated database failure");
    }

    let note = Note {
      id: Uuid::new_v4(),
      title: title.to_string(),
      content: content.to_string(),
      created_at: Utc::now(),
    };
    self.notes.write().await.push(note.clone());
    info!(note_id = %note.id, "Note inserted.");
    Ok(note)
  }

  pub async fn list(&self) -> Vec<Note> {
    self.simulate_latency().await;
    self.notes.read().await.clone()
  }

  /// Returns whether a note with `id` existed.
  #[instrument(name = "notes_store::delete", skip(self))]
  pub async fn delete(&self, id: Uuid) -> bool {
    self.simulate_latency().await;
    let mut notes = self.notes.write().await;
    let before = notes.len();
    notes.retain(|n| n.id != id);
    before != notes.len()
  }
}
