//! Engine process adapter.
//!
//! Resolves the configured engine command line, expands its placeholder
//! arguments for each build invocation, and runs the engine as a subprocess.
//! Also owns the file-backed record of the engine's sticky active target.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::{bail, Context, Result};

use crate::builder::orchestrator::{ActiveTargetState, BuildRunner, ExecutionReport};
use crate::builder::plan::BuildInvocation;
use crate::core::manifest::EngineConfig;
use crate::core::platform::Platform;
use crate::util::fs;
use crate::util::process::{find_executable, ProcessBuilder};

/// Directory under the project root holding flotilla's local state.
pub const STATE_DIR: &str = ".flotilla";

const ACTIVE_TARGET_FILE: &str = "active-target";

/// Argument template used when the `[engine]` section leaves `args` empty.
const DEFAULT_ARGS: &[&str] = &[
    "-batchmode",
    "-quit",
    "-projectPath",
    "{project}",
    "-buildTarget",
    "{target}",
    "-outputPath",
    "{output}",
];

const DEFAULT_DEVELOPMENT_FLAG: &str = "-development";

/// How many trailing output lines to carry into a failure report.
const OUTPUT_TAIL_LINES: usize = 8;

/// A resolved engine command line template.
///
/// The program has already been located, so expanding the template for an
/// invocation cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    program: PathBuf,
    args: Vec<String>,
    development_flag: String,
}

impl EngineCommand {
    /// Resolve the engine command from configuration.
    ///
    /// Bare program names are looked up in PATH; names containing a path
    /// separator are taken as-is.
    pub fn resolve(config: &EngineConfig) -> Result<Self> {
        let Some(name) = config.program.as_deref().filter(|p| !p.is_empty()) else {
            bail!(
                "no engine program configured\n\
                 hint: set `program` in the [engine] section of Flotilla.toml \
                 or in the global config"
            );
        };

        let program = if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            PathBuf::from(name)
        } else {
            find_executable(name)
                .with_context(|| format!("engine program `{}` not found in PATH", name))?
        };

        let args = if config.args.is_empty() {
            DEFAULT_ARGS.iter().map(|s| s.to_string()).collect()
        } else {
            config.args.clone()
        };

        let development_flag = config
            .development_flag
            .clone()
            .unwrap_or_else(|| DEFAULT_DEVELOPMENT_FLAG.to_string());

        Ok(EngineCommand {
            program,
            args,
            development_flag,
        })
    }

    /// Expand the template into a concrete command for one invocation.
    ///
    /// `{project}`, `{target}` and `{output}` are substituted inside each
    /// argument. An argument that is exactly `{scenes}` expands to one
    /// argument per scene path.
    pub fn invocation_command(
        &self,
        invocation: &BuildInvocation,
        project_dir: &Path,
    ) -> ProcessBuilder {
        let project = project_dir.display().to_string();
        let output = invocation.output_path.display().to_string();

        let mut builder = ProcessBuilder::new(&self.program);
        for arg in &self.args {
            if arg == "{scenes}" {
                builder = builder.args(invocation.scenes.iter().map(|s| s.display().to_string()));
                continue;
            }
            let expanded = arg
                .replace("{project}", &project)
                .replace("{target}", &invocation.engine_target)
                .replace("{output}", &output);
            builder = builder.arg(expanded);
        }
        if invocation.development {
            builder = builder.arg(&self.development_flag);
        }
        builder.cwd(project_dir)
    }
}

/// Runs build invocations by spawning the engine.
pub struct EngineRunner {
    command: EngineCommand,
    project_dir: PathBuf,
    state: FileTargetState,
}

impl EngineRunner {
    pub fn new(command: EngineCommand, project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let state = FileTargetState::new(&project_dir);
        EngineRunner {
            command,
            project_dir,
            state,
        }
    }
}

impl BuildRunner for EngineRunner {
    fn execute(&mut self, invocation: &BuildInvocation) -> ExecutionReport {
        let command = self.command.invocation_command(invocation, &self.project_dir);
        tracing::debug!("running {}", command.display_command());

        let output = match command.exec() {
            Ok(output) => output,
            Err(err) => return ExecutionReport::failure(format!("{:#}", err)),
        };

        // The engine switched itself to this target before building, so
        // record it even when the build itself fails.
        if let Err(err) = self.state.switch(Some(invocation.platform)) {
            tracing::warn!("failed to record active target: {:#}", err);
        }

        if output.status.success() {
            ExecutionReport::success()
        } else {
            ExecutionReport::failure(render_failure(&command, &output))
        }
    }
}

fn render_failure(command: &ProcessBuilder, output: &Output) -> String {
    let mut message = match output.status.code() {
        Some(code) => format!(
            "`{}` failed with exit code {}",
            command.display_command(),
            code
        ),
        None => format!("`{}` was terminated by a signal", command.display_command()),
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let log = if stderr.trim().is_empty() {
        stdout
    } else {
        stderr
    };
    let tail = tail_lines(&log, OUTPUT_TAIL_LINES);
    if !tail.is_empty() {
        message.push('\n');
        message.push_str(&tail);
    }
    message
}

fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

/// File-backed record of the engine's active target.
///
/// Stored as a single platform token in `.flotilla/active-target` under the
/// project root. A missing or unreadable file means no target is recorded.
#[derive(Debug, Clone)]
pub struct FileTargetState {
    path: PathBuf,
}

impl FileTargetState {
    pub fn new(project_dir: &Path) -> Self {
        FileTargetState {
            path: project_dir.join(STATE_DIR).join(ACTIVE_TARGET_FILE),
        }
    }
}

impl ActiveTargetState for FileTargetState {
    fn current(&self) -> Option<Platform> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match content.trim().parse() {
            Ok(platform) => Some(platform),
            Err(err) => {
                tracing::warn!("ignoring active target state: {}", err);
                None
            }
        }
    }

    fn switch(&mut self, platform: Option<Platform>) -> Result<()> {
        match platform {
            Some(platform) => fs::write_string(&self.path, &format!("{}\n", platform.as_str())),
            None => {
                if self.path.exists() {
                    std::fs::remove_file(&self.path).with_context(|| {
                        format!("failed to remove {}", self.path.display())
                    })?;
                }
                Ok(())
            }
        }
    }
}
