use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct LogArgs {
    /// Commit to start the walk from (default: @)
    #[arg(default_value = "@")]
    start: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let start = kit_repository::get_oid(&args.start)?;
    let store = kit_repository::odb();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for oid in kit_revwalk::iter_commits_and_parents(&store, [start]) {
        let oid = oid?;
        let commit = kit_repository::get_commit(oid)?;
        writeln!(out, "commit {oid}")?;
        out.write_all(&commit.message)?;
        if !commit.message.ends_with(b"\n") {
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    Ok(0)
}
