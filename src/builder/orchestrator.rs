//! Sequential build orchestration.
//!
//! Runs a BuildPlan one invocation at a time against the engine, with a
//! progress checkpoint before and after each invocation, cooperative
//! cancellation, first-error stop, and restoration of the engine's active
//! target on every exit path.

use anyhow::Result;

use crate::builder::plan::{BuildInvocation, BuildPlan};
use crate::core::platform::Platform;

/// Outcome of one engine invocation, as reported by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Error text from the engine. Absent or empty means success.
    pub error: Option<String>,
}

impl ExecutionReport {
    pub fn success() -> Self {
        ExecutionReport { error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ExecutionReport {
            error: Some(message.into()),
        }
    }

    /// The error text, when the invocation actually failed.
    pub fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|m| !m.is_empty())
    }

    pub fn is_success(&self) -> bool {
        self.failure_message().is_none()
    }
}

/// Runs one build invocation to completion. Implementations block until the
/// engine finishes; failures are reported in the result, never panicked.
pub trait BuildRunner {
    fn execute(&mut self, invocation: &BuildInvocation) -> ExecutionReport;
}

/// Access to the engine's sticky "currently active target" state.
///
/// The engine leaves whatever it built last as the active target, so the
/// orchestrator records the value at entry and puts it back at exit.
pub trait ActiveTargetState {
    /// The currently recorded active target, if any.
    fn current(&self) -> Option<Platform>;

    /// Point the active target at `platform`, or clear it with `None`.
    fn switch(&mut self, platform: Option<Platform>) -> Result<()>;
}

/// Progress checkpoint position relative to an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Before,
    After,
}

/// Terminal status of an orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every invocation completed.
    Done,
    /// A progress checkpoint declined to continue. Not a failure.
    Cancelled,
    /// An invocation reported an error.
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Done => "done",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
        }
    }
}

/// What happened when a plan ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationResult {
    pub status: RunStatus,
    /// Invocations that completed successfully. Completed work is never
    /// rolled back on cancellation or failure.
    pub completed: usize,
    /// Error text from the failing invocation, verbatim, when `Failed`.
    pub error: Option<String>,
}

type ProgressCallback<'a> = Box<dyn FnMut(&BuildInvocation, f64, ProgressPhase) -> bool + 'a>;

/// Executes build plans strictly sequentially.
///
/// One invocation fully completes (or fails) before the next begins; the
/// engine is assumed to handle a single build at a time. Cancellation is
/// cooperative: the progress callback returns `false` at a checkpoint, and
/// no further invocations run. An in-flight engine call is never interrupted.
pub struct Orchestrator<'a> {
    runner: &'a mut dyn BuildRunner,
    state: &'a mut dyn ActiveTargetState,
    on_progress: Option<ProgressCallback<'a>>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(runner: &'a mut dyn BuildRunner, state: &'a mut dyn ActiveTargetState) -> Self {
        Orchestrator {
            runner,
            state,
            on_progress: None,
        }
    }

    /// Install a progress callback, called with the invocation, the fraction
    /// of the plan completed so far, and the checkpoint phase. Returning
    /// `false` cancels the run at that checkpoint.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&BuildInvocation, f64, ProgressPhase) -> bool + 'a,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Run the plan to a terminal status.
    ///
    /// Whatever the outcome, the active target recorded at entry is restored
    /// before returning. A restore failure is logged and swallowed so it
    /// cannot mask the primary result.
    pub fn run(&mut self, plan: &BuildPlan) -> OrchestrationResult {
        let entry_target = self.state.current();
        let result = self.run_inner(plan);
        self.restore_target(entry_target);
        result
    }

    fn run_inner(&mut self, plan: &BuildPlan) -> OrchestrationResult {
        let total = plan.len();
        let mut completed = 0usize;

        for invocation in &plan.invocations {
            if !self.notify(invocation, completed, total, ProgressPhase::Before) {
                tracing::debug!("build cancelled before {}", invocation.platform);
                return OrchestrationResult {
                    status: RunStatus::Cancelled,
                    completed,
                    error: None,
                };
            }

            tracing::debug!(
                "building {} -> {}",
                invocation.platform,
                invocation.output_path.display()
            );
            let report = self.runner.execute(invocation);
            if let Some(message) = report.failure_message() {
                return OrchestrationResult {
                    status: RunStatus::Failed,
                    completed,
                    error: Some(message.to_string()),
                };
            }

            completed += 1;
            if !self.notify(invocation, completed, total, ProgressPhase::After) {
                tracing::debug!("build cancelled after {}", invocation.platform);
                return OrchestrationResult {
                    status: RunStatus::Cancelled,
                    completed,
                    error: None,
                };
            }
        }

        OrchestrationResult {
            status: RunStatus::Done,
            completed,
            error: None,
        }
    }

    fn notify(
        &mut self,
        invocation: &BuildInvocation,
        completed: usize,
        total: usize,
        phase: ProgressPhase,
    ) -> bool {
        match self.on_progress.as_mut() {
            Some(callback) => {
                let fraction = if total == 0 {
                    1.0
                } else {
                    completed as f64 / total as f64
                };
                callback(invocation, fraction, phase)
            }
            None => true,
        }
    }

    fn restore_target(&mut self, entry: Option<Platform>) {
        if self.state.current() == entry {
            return;
        }
        match self.state.switch(entry) {
            Ok(()) => match entry {
                Some(platform) => tracing::debug!("restored active target to {}", platform),
                None => tracing::debug!("cleared active target"),
            },
            Err(err) => {
                tracing::warn!("failed to restore active target: {:#}", err);
            }
        }
    }
}
