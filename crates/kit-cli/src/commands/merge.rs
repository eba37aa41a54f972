use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use kit_repository::MergeOutcome;

#[derive(Args)]
pub struct MergeArgs {
    /// Commit to merge into the current branch
    commit: String,
}

pub fn run(args: &MergeArgs) -> Result<i32> {
    let other = kit_repository::get_oid(&args.commit)?;
    let outcome = kit_repository::merge(other)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match outcome {
        MergeOutcome::AlreadyUpToDate => writeln!(out, "Already up to date.")?,
        MergeOutcome::FastForwarded => writeln!(out, "Fast-forward")?,
        MergeOutcome::NeedsCommit => writeln!(
            out,
            "Merge made; resolve any conflict markers and run commit."
        )?,
    }

    Ok(0)
}
