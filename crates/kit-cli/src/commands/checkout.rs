use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch name or commit to check out
    name: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    kit_repository::checkout(&args.name)?;
    Ok(0)
}
