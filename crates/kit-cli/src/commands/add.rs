use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct AddArgs {
    /// Files or directories to add
    #[arg(value_name = "pathspec", required = true)]
    files: Vec<String>,
}

pub fn run(args: &AddArgs) -> Result<i32> {
    kit_repository::add(&args.files)?;
    Ok(0)
}
