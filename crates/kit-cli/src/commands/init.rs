use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct InitArgs {
    /// Be quiet, only report errors
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: &InitArgs) -> Result<i32> {
    kit_repository::init()?;

    if !args.quiet {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        let dir = std::fs::canonicalize(kit_repository::current_dir())
            .unwrap_or_else(|_| kit_repository::current_dir());
        writeln!(err, "Initialized empty repository in {}", dir.display())?;
    }

    Ok(0)
}
