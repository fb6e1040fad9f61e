// src/lib.rs

//! Fern: a request-handling pipeline builder.
//!
//! Each route registered with [`Fern::endpoint`] owns an ordered sequence of
//! steps. For every request the dispatcher creates a fresh [`Context`], runs the
//! steps in order and stops at the first failure, suspending on steps whose
//! outcome is deferred. The [`ResponseFinalizer`] writes the response exactly once:
//!  - `send_ok(payload)` → payload + `status: 200`, HTTP 200.
//!  - `send_error(code, message, stack)` → `{message, stack?, status}`, HTTP `code`.
//!
//! The crate is transport-agnostic: a driver turns its requests into
//! [`RawRequest`]s, calls [`Fern::dispatch`] and writes back the returned
//! [`FinalResponse`].

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod response;
pub mod steps;

// --- Re-exports for the Public API ---

pub use crate::core::context::{Context, RawRequest};
pub use crate::core::context_data::ContextData;
pub use crate::core::method::Method;
pub use crate::core::outcome::{Failure, Outcome, PipelineResult, GENERIC_FAILURE_MESSAGE};
pub use crate::core::step::{StepDef, StepFn};

pub use crate::config::FernOptions;
pub use crate::error::{FernError, FernResult};
pub use crate::pipeline::Pipeline;
pub use crate::registry::{Fern, RouteBuilder};
pub use crate::response::{FinalResponse, ResponseFinalizer, ResponseSink, ResponseSlot};

/*
    Defining a route:
    1. `let mut fern = Fern::new(FernOptions::default());`
    2. `fern.endpoint("/users", Method::Post)`
         `.map_body_strict(["name", "email"])`
         `.map_db(vec![json!("users")])`
         `.use_db(|ctx| async move { /* insert */ Ok(true) })`
         `.send(json!({"message": "created"}));`
    3. Share the registry (`Arc<Fern>`) with the driver, which calls
       `fern.dispatch(raw_request).await` for every inbound request.
*/
