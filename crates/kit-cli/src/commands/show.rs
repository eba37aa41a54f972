use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use kit_diff::tree::unified_blob_diff;

#[derive(Args)]
pub struct ShowArgs {
    /// Commit to show (default: @)
    #[arg(default_value = "@")]
    commit: String,
}

pub fn run(args: &ShowArgs) -> Result<i32> {
    let oid = kit_repository::get_oid(&args.commit)?;
    let commit = kit_repository::get_commit(oid)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "commit {oid}")?;
    writeln!(out)?;
    out.write_all(&commit.message)?;
    writeln!(out)?;

    let this_tree = kit_repository::get_tree(commit.tree)?;
    let parent_tree = match commit.first_parent() {
        Some(parent) => kit_repository::get_tree(kit_repository::get_commit(*parent)?.tree)?,
        None => Default::default(),
    };

    let store = kit_repository::odb();
    let diff = kit_diff::diff_trees(&parent_tree, &this_tree, &unified_blob_diff(&store));
    out.write_all(&diff)?;

    Ok(0)
}
