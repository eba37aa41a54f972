use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ResetArgs {
    /// Commit to move HEAD to
    commit: String,
}

pub fn run(args: &ResetArgs) -> Result<i32> {
    let oid = kit_repository::get_oid(&args.commit)?;
    kit_repository::reset(oid)?;
    Ok(0)
}
