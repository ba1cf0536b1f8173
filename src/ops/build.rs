//! Implementation of `flotilla build` and `flotilla batch`.

use std::cell::RefCell;
use std::time::Instant;

use anyhow::{bail, Result};

use crate::builder::{
    ActiveTargetState, BuildEvent, BuildPlan, EngineCommand, EngineRunner, FileTargetState,
    Orchestrator, ProgressPhase, RunStatus,
};
use crate::core::manifest::Manifest;
use crate::core::platform::Platform;
use crate::core::settings::BuildSettings;
use crate::util::shell::{format_duration, Shell, Status};
use crate::util::{fs, Config};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Override the manifest's development flag
    pub development: Option<bool>,

    /// Override the manifest's output root
    pub output_root: Option<String>,

    /// Restrict the run to these platform tokens (empty = all configured)
    pub targets: Vec<String>,

    /// Emit the build plan as JSON instead of building
    pub emit_plan: bool,
}

/// Arguments for `flotilla batch`, as given on the command line.
///
/// Tokens are kept raw so error messages can name the offending argument.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output folder for all builds
    pub output_root: String,

    /// Development flag token, must be exactly `true` or `false`
    pub development: String,

    /// Platform tokens to build
    pub platforms: Vec<String>,
}

/// Outcome of a build run.
#[derive(Debug)]
pub struct BuildOutcome {
    /// How the run ended
    pub status: RunStatus,

    /// Invocations that finished successfully
    pub completed: usize,

    /// Invocations in the plan
    pub total: usize,

    /// Platform whose invocation failed, when status is Failed
    pub failed_platform: Option<Platform>,

    /// Engine error, passed through verbatim
    pub error: Option<String>,
}

/// Build the project's configured platforms.
pub fn build(
    manifest: &Manifest,
    config: &Config,
    shell: &Shell,
    opts: &BuildOptions,
) -> Result<BuildOutcome> {
    let mut settings = manifest.build.clone();
    if let Some(development) = opts.development {
        settings.development = development;
    }
    if let Some(output_root) = &opts.output_root {
        settings.output_root = output_root.clone();
    }
    apply_target_filter(&mut settings, &opts.targets)?;

    let plan = compile_plan(manifest, &settings)?;

    if opts.emit_plan {
        let plan_json = serde_json::to_string_pretty(&plan)?;
        println!("{}", plan_json);

        return Ok(BuildOutcome {
            status: RunStatus::Done,
            completed: 0,
            total: plan.len(),
            failed_platform: None,
            error: None,
        });
    }

    execute_plan(manifest, config, shell, &plan, settings.development, true)
}

/// Build a one-off list of platforms, ignoring the manifest's `[build]` section.
///
/// This is the scripting entry point: arguments are parsed strictly and the
/// first problem is fatal, before any engine invocation runs.
pub fn batch_build(
    manifest: &Manifest,
    config: &Config,
    shell: &Shell,
    opts: &BatchOptions,
) -> Result<BuildOutcome> {
    let development: bool = opts.development.parse().map_err(|_| {
        anyhow::anyhow!(
            "development build argument `{}` is not a valid boolean (expected `true` or `false`)",
            opts.development
        )
    })?;

    let mut settings = BuildSettings::new();
    settings.output_root = opts.output_root.clone();
    settings.use_product_name = true;
    settings.development = development;

    for token in &opts.platforms {
        let platform: Platform = token.parse()?;
        if settings.has_target(platform) {
            // Repeated tokens collapse to one build.
            continue;
        }
        settings.add_target(platform)?;
    }

    let plan = compile_plan(manifest, &settings)?;
    execute_plan(manifest, config, shell, &plan, development, false)
}

/// Drop configured targets that are not in the requested set.
fn apply_target_filter(settings: &mut BuildSettings, tokens: &[String]) -> Result<()> {
    if tokens.is_empty() {
        return Ok(());
    }

    let mut keep = Vec::new();
    for token in tokens {
        let platform: Platform = token.parse()?;
        if !settings.has_target(platform) {
            let configured: Vec<&str> = settings.targets().iter().map(|p| p.as_str()).collect();
            bail!(
                "platform `{}` is not a configured build target\n\
                 configured targets: {}\n\
                 hint: add it with `flotilla target add {}`",
                token,
                if configured.is_empty() {
                    "(none)".to_string()
                } else {
                    configured.join(", ")
                },
                token
            );
        }
        keep.push(platform);
    }

    for platform in settings.targets().to_vec() {
        if !keep.contains(&platform) {
            settings.remove_target(platform)?;
        }
    }
    Ok(())
}

/// Expand scene globs and compile the plan.
fn compile_plan(manifest: &Manifest, settings: &BuildSettings) -> Result<BuildPlan> {
    let scenes = fs::glob_files(&manifest.manifest_dir, &manifest.project.scenes)?;
    Ok(BuildPlan::compile(settings, &scenes, manifest.product_name())?)
}

/// Run every invocation in the plan against the configured engine.
fn execute_plan(
    manifest: &Manifest,
    config: &Config,
    shell: &Shell,
    plan: &BuildPlan,
    development: bool,
    progress_ui: bool,
) -> Result<BuildOutcome> {
    let total = plan.len();
    let engine = config.effective_engine(&manifest.engine);
    let command = EngineCommand::resolve(&engine)?;

    let mut runner = EngineRunner::new(command, manifest.manifest_dir.clone());
    let mut state = FileTargetState::new(&manifest.manifest_dir);
    let entry_target = state.current();

    shell.json_event(&BuildEvent::started(
        manifest.product_name(),
        total as u64,
        development,
    ));

    let progress = RefCell::new(if progress_ui {
        Some(shell.progress(total as u64, "building"))
    } else {
        None
    });

    let start = Instant::now();
    let mut finished_so_far: u64 = 0;
    let result = Orchestrator::new(&mut runner, &mut state)
        .on_progress(|invocation, _fraction, phase| {
            match phase {
                ProgressPhase::Before => {
                    if shell.is_verbose() {
                        shell.status(
                            Status::Building,
                            format!(
                                "{} -> {}",
                                invocation.platform,
                                invocation.output_path.display()
                            ),
                        );
                    }
                    if let Some(bar) = progress.borrow().as_ref() {
                        bar.set_message(invocation.platform.to_string());
                    }
                    shell.json_event(&BuildEvent::progress(
                        finished_so_far,
                        total as u64,
                        invocation.platform.as_str(),
                        "starting",
                    ));
                }
                ProgressPhase::After => {
                    finished_so_far += 1;
                    if let Some(bar) = progress.borrow_mut().as_mut() {
                        bar.inc(1);
                    }
                    shell.json_event(&BuildEvent::target_built(
                        invocation.platform.as_str(),
                        invocation.output_path.clone(),
                    ));
                    shell.json_event(&BuildEvent::progress(
                        finished_so_far,
                        total as u64,
                        invocation.platform.as_str(),
                        "finished",
                    ));
                }
            }
            true
        })
        .run(plan);

    if let Some(bar) = progress.borrow().as_ref() {
        bar.finish();
    }

    let elapsed = start.elapsed();
    let duration_ms = elapsed.as_millis() as u64;

    let outcome = match result.status {
        RunStatus::Done => {
            shell.json_event(&BuildEvent::finished(
                true,
                duration_ms,
                result.completed as u64,
            ));
            shell.status(
                Status::Finished,
                format!(
                    "{} {} in {}",
                    result.completed,
                    if result.completed == 1 {
                        "target"
                    } else {
                        "targets"
                    },
                    format_duration(elapsed)
                ),
            );
            BuildOutcome {
                status: RunStatus::Done,
                completed: result.completed,
                total,
                failed_platform: None,
                error: None,
            }
        }
        RunStatus::Failed => {
            let platform = plan.invocations[result.completed].platform;
            let message = result.error.clone().unwrap_or_default();
            shell.json_event(&BuildEvent::error(
                message.clone(),
                Some(platform.as_str().to_string()),
            ));
            shell.json_event(&BuildEvent::finished(
                false,
                duration_ms,
                result.completed as u64,
            ));
            if !shell.is_json() {
                shell.error(format!("building `{}` failed: {}", platform, message));
            }
            BuildOutcome {
                status: RunStatus::Failed,
                completed: result.completed,
                total,
                failed_platform: Some(platform),
                error: Some(message),
            }
        }
        RunStatus::Cancelled => {
            shell.json_event(&BuildEvent::finished(
                false,
                duration_ms,
                result.completed as u64,
            ));
            shell.warn("build cancelled");
            BuildOutcome {
                status: RunStatus::Cancelled,
                completed: result.completed,
                total,
                failed_platform: None,
                error: None,
            }
        }
    };

    if let Some(entry) = entry_target {
        let last_built = plan.invocations[..result.completed].last().map(|i| i.platform);
        if shell.is_verbose()
            && result.completed > 0
            && last_built != Some(entry)
            && state.current() == Some(entry)
        {
            shell.status(Status::Restored, format!("active target `{}`", entry));
        }
    }

    Ok(outcome)
}
