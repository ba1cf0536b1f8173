//! `flotilla platforms` command

use anyhow::Result;

use flotilla::core::sorted_display_list;

pub fn execute() -> Result<()> {
    for (platform, display_name) in sorted_display_list() {
        println!("{:<14} {}", platform, display_name);
    }
    Ok(())
}
