//! Command implementations

use anyhow::{bail, Result};

use flotilla::builder::RunStatus;
use flotilla::ops::BuildOutcome;

pub mod batch;
pub mod build;
pub mod completions;
pub mod init;
pub mod platforms;
pub mod target;

/// Turn a finished run into the command's exit result.
///
/// Failure details were already reported through the shell; this adds the
/// final error line and the non-zero exit.
fn check_outcome(outcome: &BuildOutcome) -> Result<()> {
    match outcome.status {
        RunStatus::Done => Ok(()),
        RunStatus::Cancelled => bail!("build cancelled"),
        RunStatus::Failed => {
            let platform = outcome
                .failed_platform
                .map(|p| p.as_str())
                .unwrap_or("unknown");
            bail!(
                "failed to build `{}` ({} of {} targets completed)",
                platform,
                outcome.completed,
                outcome.total
            )
        }
    }
}
