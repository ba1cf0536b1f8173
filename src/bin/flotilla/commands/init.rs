//! `flotilla init` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::InitArgs;
use flotilla::ops::{init_project, InitOptions};
use flotilla::util::{Shell, Status};

pub fn execute(args: InitArgs, shell: &Shell) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));

    let opts = InitOptions { name: args.name };
    let name = init_project(&path, &opts)?;

    shell.status(Status::Created, format!("flotilla project `{}`", name));

    Ok(())
}
