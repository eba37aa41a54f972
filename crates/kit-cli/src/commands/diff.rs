use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use kit_diff::tree::unified_blob_diff;
use kit_diff::TreeMap;
use kit_ref::HEAD;

#[derive(Args)]
pub struct DiffArgs {
    /// Compare HEAD's tree against the index instead of the index against
    /// the working directory
    #[arg(long)]
    cached: bool,

    /// Compare this commit's tree against the working directory
    commit: Option<String>,
}

pub fn run(args: &DiffArgs) -> Result<i32> {
    let (from, to): (TreeMap, TreeMap) = if let Some(commit) = &args.commit {
        let oid = kit_repository::get_oid(commit)?;
        let tree_oid = kit_repository::get_commit(oid)?.tree;
        (kit_repository::get_tree(tree_oid)?, kit_repository::get_working_tree()?)
    } else if args.cached {
        let head_tree = match kit_repository::get_oid(HEAD) {
            Ok(oid) => kit_repository::get_tree(kit_repository::get_commit(oid)?.tree)?,
            Err(_) => TreeMap::new(),
        };
        (head_tree, kit_repository::get_index()?)
    } else {
        (kit_repository::get_index()?, kit_repository::get_working_tree()?)
    };

    let store = kit_repository::odb();
    let diff = kit_diff::diff_trees(&from, &to, &unified_blob_diff(&store));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(&diff)?;

    Ok(0)
}
