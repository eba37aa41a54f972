use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct PushArgs {
    /// Directory of the repository to push to
    remote_dir: PathBuf,

    /// Ref to push (default: HEAD)
    #[arg(default_value = "HEAD")]
    refname: String,
}

pub fn run(args: &PushArgs) -> Result<i32> {
    kit_repository::push(args.remote_dir.clone(), &args.refname)?;
    Ok(0)
}
