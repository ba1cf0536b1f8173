//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use flotilla::util::ColorChoice;

/// Flotilla - A multi-platform build driver for game engine projects
#[derive(Parser)]
#[command(name = "flotilla")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output, print errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to use colored output
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for status messages
    #[arg(long, global = true, value_name = "FORMAT", default_value = "human")]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Status lines and progress bars for people
    Human,
    /// Newline-delimited JSON events on stdout
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a flotilla project in an existing directory
    Init(InitArgs),

    /// Build every configured target platform
    Build(BuildArgs),

    /// Build an ad-hoc list of platforms without touching Flotilla.toml
    Batch(BatchArgs),

    /// Manage the build target list in Flotilla.toml
    Target(TargetArgs),

    /// List every supported platform token
    Platforms,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Product name (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Directory to initialize (defaults to the current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Produce development builds with script debugging
    #[arg(long)]
    pub development: bool,

    /// Folder the per-platform build folders go into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<String>,

    /// Build only this configured target (repeatable)
    #[arg(short, long, value_name = "PLATFORM")]
    pub target: Vec<String>,

    /// Print the compiled build plan as JSON without building
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Folder all builds are placed under
    pub output_folder: String,

    /// Whether to produce development builds (`true` or `false`)
    pub development: String,

    /// Platform tokens to build
    #[arg(required = true)]
    pub platforms: Vec<String>,
}

#[derive(Args)]
pub struct TargetArgs {
    #[command(subcommand)]
    pub command: TargetCommands,
}

#[derive(Subcommand)]
pub enum TargetCommands {
    /// Add a platform to the build targets
    Add(TargetAddArgs),

    /// Remove a platform from the build targets
    Remove(TargetRemoveArgs),

    /// List the configured build targets
    List,
}

#[derive(Args)]
pub struct TargetAddArgs {
    /// Platform token, for example `win64` or `webgl`
    pub platform: String,
}

#[derive(Args)]
pub struct TargetRemoveArgs {
    /// Platform token to remove
    pub platform: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
