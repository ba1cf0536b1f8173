//! Build event types for JSON output.
//!
//! This module defines the stable JSON schema for machine-readable build output.
//! These events are emitted when using `--message-format=json`.
//!
//! # Event Types
//!
//! - `build-started`: A build run began
//! - `build-progress`: Progress update between engine invocations
//! - `target-built`: One platform finished building
//! - `build-finished`: Build run completed (success or failure)
//! - `build-error`: An engine invocation failed
//!
//! # Stability
//!
//! The JSON schema is versioned and should remain backwards compatible.
//! New fields may be added, but existing fields should not be removed or renamed.

use std::path::PathBuf;

use serde::Serialize;

/// A build event emitted during a build run.
///
/// Each event is serialized as a single JSON object per line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reason")]
pub enum BuildEvent {
    /// A build run began.
    #[serde(rename = "build-started")]
    BuildStarted {
        /// Product being built
        project: String,
        /// Number of platforms queued
        target_count: u64,
        /// Whether this is a development build
        development: bool,
    },

    /// Progress update between engine invocations.
    #[serde(rename = "build-progress")]
    Progress {
        /// Completed invocation count
        current: u64,
        /// Total invocation count
        total: u64,
        /// Platform token for the invocation at this checkpoint
        platform: String,
        /// Checkpoint phase ("starting" or "finished")
        phase: String,
    },

    /// One platform finished building.
    #[serde(rename = "target-built")]
    TargetBuilt {
        /// Platform token
        platform: String,
        /// Path of the produced build
        output_path: PathBuf,
    },

    /// Build run completed (success or failure).
    #[serde(rename = "build-finished")]
    BuildFinished {
        /// Whether every queued platform was built
        success: bool,
        /// Total run duration in milliseconds
        duration_ms: u64,
        /// Number of platforms built
        #[serde(skip_serializing_if = "Option::is_none")]
        targets_built: Option<u64>,
    },

    /// An engine invocation failed.
    #[serde(rename = "build-error")]
    BuildError {
        /// Error message text
        message: String,
        /// Platform that failed (if the failure is tied to one)
        #[serde(skip_serializing_if = "Option::is_none")]
        platform: Option<String>,
    },
}

impl BuildEvent {
    /// Create a build started event.
    pub fn started(project: impl Into<String>, target_count: u64, development: bool) -> Self {
        BuildEvent::BuildStarted {
            project: project.into(),
            target_count,
            development,
        }
    }

    /// Create a progress event.
    pub fn progress(
        current: u64,
        total: u64,
        platform: impl Into<String>,
        phase: impl Into<String>,
    ) -> Self {
        BuildEvent::Progress {
            current,
            total,
            platform: platform.into(),
            phase: phase.into(),
        }
    }

    /// Create a target built event.
    pub fn target_built(platform: impl Into<String>, output_path: PathBuf) -> Self {
        BuildEvent::TargetBuilt {
            platform: platform.into(),
            output_path,
        }
    }

    /// Create a build finished event.
    pub fn finished(success: bool, duration_ms: u64, targets_built: u64) -> Self {
        BuildEvent::BuildFinished {
            success,
            duration_ms,
            targets_built: Some(targets_built),
        }
    }

    /// Create a build error event.
    pub fn error(message: impl Into<String>, platform: Option<String>) -> Self {
        BuildEvent::BuildError {
            message: message.into(),
            platform,
        }
    }

    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
