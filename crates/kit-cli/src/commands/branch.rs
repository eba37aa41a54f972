use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct BranchArgs {
    /// Name of the branch to create
    name: Option<String>,

    /// Commit to start the branch at (default: @)
    start_point: Option<String>,
}

pub fn run(args: &BranchArgs) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.name {
        Some(name) => {
            let start = args.start_point.as_deref().unwrap_or("@");
            let oid = kit_repository::get_oid(start)?;
            kit_repository::create_branch(name, oid)?;
        }
        None => {
            let current = kit_repository::refs()
                .get_ref(kit_ref::HEAD, false)?
                .and_then(|v| match v {
                    kit_ref::RefValue::Symbolic(target) => Some(target),
                    kit_ref::RefValue::Direct(_) => None,
                });

            for (name, _) in kit_repository::refs().iter_refs("refs/heads/", true)? {
                let marker = if Some(&name) == current.as_ref() { "* " } else { "  " };
                let short = name.trim_start_matches("refs/heads/");
                writeln!(out, "{marker}{short}")?;
            }
        }
    }

    Ok(0)
}
