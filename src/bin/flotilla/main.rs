//! Flotilla CLI - a multi-platform build driver for game engine projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use flotilla::util::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging. Log lines go to stderr so stdout stays reserved for
    // machine output (plans, events, completion scripts).
    let filter = if cli.verbose {
        EnvFilter::new("flotilla=debug")
    } else {
        EnvFilter::new("flotilla=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );

    // Execute command
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &shell),
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Batch(args) => commands::batch::execute(args, &shell),
        Commands::Target(args) => commands::target::execute(args, &shell),
        Commands::Platforms => commands::platforms::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
