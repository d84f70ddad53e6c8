//! CLI-facing workflow logic, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{run_replace_workflow, WorkflowArgs, WorkflowOutcome, WorkflowResult};
