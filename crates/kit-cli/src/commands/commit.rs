use std::io::{self, Write};

use anyhow::{bail, Result};
use clap::Args;

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short = 'm', long, value_name = "message")]
    message: Option<String>,
}

pub fn run(args: &CommitArgs) -> Result<i32> {
    let message = match &args.message {
        Some(m) => m.clone(),
        None => bail!("a commit message is required (-m <message>)"),
    };

    let oid = kit_repository::commit(&message)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "[{}] {}", oid, message.lines().next().unwrap_or(""))?;

    Ok(0)
}
