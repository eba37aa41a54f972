use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;

#[derive(Args)]
pub struct MergeBaseArgs {
    commit_a: String,
    commit_b: String,
}

pub fn run(args: &MergeBaseArgs) -> Result<i32> {
    let a = kit_repository::get_oid(&args.commit_a)?;
    let b = kit_repository::get_oid(&args.commit_b)?;

    match kit_revwalk::get_merge_base(&kit_repository::odb(), a, b)? {
        Some(base) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{base}")?;
            Ok(0)
        }
        None => bail!("no common ancestor"),
    }
}
