use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct FetchArgs {
    /// Directory of the repository to fetch from
    remote_dir: PathBuf,
}

pub fn run(args: &FetchArgs) -> Result<i32> {
    kit_repository::fetch(args.remote_dir.clone())?;
    Ok(0)
}
