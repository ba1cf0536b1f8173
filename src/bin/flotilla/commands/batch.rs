//! `flotilla batch` command
//!
//! The scripting entry point: positional arguments, strict parsing, no
//! progress UI. The subcommand token itself plays the marker role, so
//! everything after it is `<output-folder> <development-bool> <platform>...`.

use anyhow::Result;

use crate::cli::BatchArgs;
use flotilla::ops::{batch_build, BatchOptions};
use flotilla::util::{Config, GlobalContext, Shell};
use flotilla::Manifest;

pub fn execute(args: BatchArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;
    let config = Config::load_or_default(&ctx.config_path());

    // Tokens travel raw; batch_build validates them all before any engine
    // invocation runs.
    let opts = BatchOptions {
        output_root: args.output_folder,
        development: args.development,
        platforms: args.platforms,
    };

    let outcome = batch_build(&manifest, &config, shell, &opts)?;
    super::check_outcome(&outcome)
}

#[cfg(test)]
mod tests {
    use crate::cli::BatchArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        batch: BatchArgs,
    }

    /// Helper to parse BatchArgs from command-line strings.
    fn parse_batch_args(args: &[&str]) -> BatchArgs {
        TestCli::parse_from(args).batch
    }

    // =========================================================================
    // Positional Order Tests
    // =========================================================================

    #[test]
    fn test_batch_positional_order() {
        let args = parse_batch_args(&["test", "/builds", "true", "android"]);

        assert_eq!(args.output_folder, "/builds");
        assert_eq!(args.development, "true");
        assert_eq!(args.platforms, vec!["android"]);
    }

    #[test]
    fn test_batch_multiple_platforms() {
        let args = parse_batch_args(&["test", "out", "false", "win64", "webgl", "linux64"]);

        assert_eq!(args.platforms, vec!["win64", "webgl", "linux64"]);
    }

    // =========================================================================
    // Required Argument Tests
    // =========================================================================

    #[test]
    fn test_batch_requires_at_least_one_platform() {
        let result = TestCli::try_parse_from(["test", "out", "true"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_requires_development_token() {
        let result = TestCli::try_parse_from(["test", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_requires_output_folder() {
        let result = TestCli::try_parse_from(["test"]);
        assert!(result.is_err());
    }

    // =========================================================================
    // Raw Token Tests
    // =========================================================================

    #[test]
    fn test_batch_keeps_bad_tokens_for_later_diagnosis() {
        // Argument validation happens in the operation, not in clap, so the
        // error message can quote the offending word.
        let args = parse_batch_args(&["test", "out", "yes", "dreamcast"]);

        assert_eq!(args.development, "yes");
        assert_eq!(args.platforms, vec!["dreamcast"]);
    }
}
