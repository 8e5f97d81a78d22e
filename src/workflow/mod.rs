pub mod optimize_flow;
pub mod validation;

pub use optimize_flow::{ActionOutcome, CallKind, FlowState, OptimizeFlow, OptimizeReport};
pub use validation::validate_input;
