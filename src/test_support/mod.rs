//! Test utilities and mocks for flotilla unit tests.
//!
//! This module provides scripted implementations of the build seams, so
//! orchestration logic can be tested without spawning a real engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use flotilla::test_support::{RecordingTargetState, ScriptedRunner};
//!
//! #[test]
//! fn test_example() {
//!     let mut runner = ScriptedRunner::always_succeeding();
//!     let mut state = RecordingTargetState::new(None);
//!
//!     // Drive an Orchestrator against the mocks...
//! }
//! ```

pub mod fixtures;

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::builder::orchestrator::{ActiveTargetState, BuildRunner, ExecutionReport};
use crate::builder::plan::BuildInvocation;
use crate::core::platform::Platform;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Build runner that replays canned outcomes instead of spawning anything.
#[derive(Debug)]
pub struct ScriptedRunner {
    outcomes: VecDeque<ExecutionReport>,
    tracked: Option<Rc<Cell<Option<Platform>>>>,
    /// Platforms in the order they were built.
    pub calls: Vec<Platform>,
}

impl ScriptedRunner {
    /// A runner where every invocation succeeds.
    pub fn always_succeeding() -> Self {
        Self::with_outcomes(Vec::new())
    }

    /// A runner that replays the given reports in order.
    ///
    /// Invocations past the end of the script succeed.
    pub fn with_outcomes(outcomes: Vec<ExecutionReport>) -> Self {
        ScriptedRunner {
            outcomes: outcomes.into(),
            tracked: None,
            calls: Vec::new(),
        }
    }

    /// Mirror the engine's side effect of leaving the built platform active
    /// in the given state.
    pub fn tracking(mut self, state: &RecordingTargetState) -> Self {
        self.tracked = Some(state.handle());
        self
    }
}

impl BuildRunner for ScriptedRunner {
    fn execute(&mut self, invocation: &BuildInvocation) -> ExecutionReport {
        self.calls.push(invocation.platform);
        if let Some(cell) = &self.tracked {
            cell.set(Some(invocation.platform));
        }
        self.outcomes
            .pop_front()
            .unwrap_or_else(ExecutionReport::success)
    }
}

/// Active-target state that records every switch request.
#[derive(Debug)]
pub struct RecordingTargetState {
    current: Rc<Cell<Option<Platform>>>,
    fail_switches: bool,
    /// Values passed to `switch`, in order.
    pub switches: Vec<Option<Platform>>,
}

impl RecordingTargetState {
    pub fn new(current: Option<Platform>) -> Self {
        RecordingTargetState {
            current: Rc::new(Cell::new(current)),
            fail_switches: false,
            switches: Vec::new(),
        }
    }

    /// Make every switch call fail.
    pub fn failing_switches(mut self) -> Self {
        self.fail_switches = true;
        self
    }

    /// Shared handle to the current value, for runners that track it.
    pub fn handle(&self) -> Rc<Cell<Option<Platform>>> {
        Rc::clone(&self.current)
    }
}

impl ActiveTargetState for RecordingTargetState {
    fn current(&self) -> Option<Platform> {
        self.current.get()
    }

    fn switch(&mut self, platform: Option<Platform>) -> Result<()> {
        self.switches.push(platform);
        if self.fail_switches {
            bail!("switch rejected");
        }
        self.current.set(platform);
        Ok(())
    }
}
