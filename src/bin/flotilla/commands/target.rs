//! `flotilla target` command

use anyhow::Result;

use crate::cli::{TargetArgs, TargetCommands};
use flotilla::ops::{add_target, list_targets, remove_target};
use flotilla::util::{GlobalContext, Shell, Status};

pub fn execute(args: TargetArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.find_manifest()?;

    match args.command {
        TargetCommands::Add(add) => {
            let platform = add_target(&manifest_path, &add.platform)?;
            shell.status(
                Status::Added,
                format!("build target `{}` ({})", platform, platform.display_name()),
            );
        }
        TargetCommands::Remove(remove) => {
            let platform = remove_target(&manifest_path, &remove.platform)?;
            shell.status(
                Status::Removed,
                format!("build target `{}` ({})", platform, platform.display_name()),
            );
        }
        TargetCommands::List => {
            let targets = list_targets(&manifest_path)?;
            if targets.is_empty() {
                shell.note("no build targets configured; add one with `flotilla target add <platform>`");
            }
            for platform in targets {
                println!("{:<14} {}", platform, platform.display_name());
            }
        }
    }

    Ok(())
}
