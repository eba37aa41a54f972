use anyhow::Result;
use clap::Args;
use kit_hash::ObjectId;

#[derive(Args)]
pub struct ReadTreeArgs {
    /// Tree object to read into the working directory
    tree: String,
}

pub fn run(args: &ReadTreeArgs) -> Result<i32> {
    let oid = ObjectId::from_hex(&args.tree).or_else(|_| kit_repository::get_oid(&args.tree))?;
    kit_repository::read_tree(oid)?;
    Ok(0)
}
