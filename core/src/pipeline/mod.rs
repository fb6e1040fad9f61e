// fern/src/pipeline/mod.rs

//! Defines the `Pipeline` struct and its execution logic.

pub mod definition;
pub mod execution;

pub use definition::Pipeline;
pub use execution::{TIMEOUT_MESSAGE, TIMEOUT_STATUS};
