//! `flotilla build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use flotilla::ops::{build, BuildOptions};
use flotilla::util::{Config, GlobalContext, Shell};
use flotilla::Manifest;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;
    let manifest = Manifest::load(&manifest_path)?;

    // Per-user configuration supplies engine defaults the manifest can override.
    let config = Config::load_or_default(&ctx.config_path());

    let opts = BuildOptions {
        development: args.development.then_some(true),
        output_root: args.output,
        targets: args.target,
        emit_plan: args.plan,
    };

    let outcome = build(&manifest, &config, shell, &opts)?;
    super::check_outcome(&outcome)
}

#[cfg(test)]
mod tests {
    use crate::cli::BuildArgs;
    use clap::Parser;

    /// Helper to parse BuildArgs from command-line strings.
    fn parse_build_args(args: &[&str]) -> BuildArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            build: BuildArgs,
        }
        let cli = TestCli::parse_from(args);
        cli.build
    }

    // =========================================================================
    // BuildArgs Default Values Tests
    // =========================================================================

    #[test]
    fn test_build_args_defaults() {
        let args = parse_build_args(&["test"]);

        assert!(!args.development);
        assert!(args.output.is_none());
        assert!(args.target.is_empty());
        assert!(!args.plan);
    }

    // =========================================================================
    // Flag Tests
    // =========================================================================

    #[test]
    fn test_build_development() {
        let args = parse_build_args(&["test", "--development"]);
        assert!(args.development);
    }

    #[test]
    fn test_build_output_short_and_long() {
        let short = parse_build_args(&["test", "-o", "dist"]);
        let long = parse_build_args(&["test", "--output", "dist"]);
        assert_eq!(short.output.as_deref(), Some("dist"));
        assert_eq!(long.output.as_deref(), Some("dist"));
    }

    #[test]
    fn test_build_target_is_repeatable() {
        let args = parse_build_args(&["test", "-t", "android", "--target", "webgl"]);
        assert_eq!(args.target, vec!["android", "webgl"]);
    }

    #[test]
    fn test_build_plan_flag() {
        let args = parse_build_args(&["test", "--plan"]);
        assert!(args.plan);
    }
}
