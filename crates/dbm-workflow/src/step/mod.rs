pub mod context;
pub mod trait_step;
pub mod trans_data;

pub use context::{FlowRuntime, StepContext};
pub use trait_step::{Step, StepOutput, StepResult};
pub use trans_data::TransData;
