pub mod notes_store;
