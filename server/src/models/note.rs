// fern_server/src/models/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
  pub id: Uuid,
  pub title: String,
  pub content: String,
  pub created_at: DateTime<Utc>,
}
