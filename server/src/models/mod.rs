// fern_server/src/models/mod.rs

pub mod note;

pub use note::Note;
