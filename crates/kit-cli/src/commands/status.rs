use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use kit_diff::ChangeAction;

#[derive(Args)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs) -> Result<i32> {
    let status = kit_repository::status()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &status.branch {
        Some(branch) => writeln!(out, "On branch {branch}")?,
        None => writeln!(out, "HEAD detached")?,
    }

    if let Some(merge_head) = status.merge_head {
        writeln!(out, "Merging: {merge_head}")?;
    }

    writeln!(out)?;
    writeln!(out, "Changes to be committed:")?;
    for (path, action) in &status.head_vs_index {
        writeln!(out, "  {}: {path}", action_label(*action))?;
    }

    writeln!(out)?;
    writeln!(out, "Changes not staged for commit:")?;
    for (path, action) in &status.index_vs_working {
        writeln!(out, "  {}: {path}", action_label(*action))?;
    }

    Ok(0)
}

fn action_label(action: ChangeAction) -> &'static str {
    match action {
        ChangeAction::New => "new file",
        ChangeAction::Deleted => "deleted",
        ChangeAction::Modified => "modified",
    }
}
