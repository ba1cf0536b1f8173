//! Multi-platform build driver.
//!
//! This module turns build settings into a plan of engine invocations and
//! runs them sequentially, one platform at a time.

pub mod engine;
pub mod events;
pub mod orchestrator;
pub mod plan;

pub use engine::{EngineCommand, EngineRunner, FileTargetState};
pub use events::BuildEvent;
pub use orchestrator::{
    ActiveTargetState, BuildRunner, ExecutionReport, OrchestrationResult, Orchestrator,
    ProgressPhase, RunStatus,
};
pub use plan::{BuildInvocation, BuildPlan};
