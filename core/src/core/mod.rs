pub mod context;
pub mod context_data;
pub mod method;
pub mod outcome;
pub mod step;

pub use context::{Context, RawRequest};
pub use context_data::ContextData;
pub use method::Method;
pub use outcome::{Failure, Outcome, PipelineResult};
pub use step::{StepDef, StepFn};
