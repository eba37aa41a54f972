use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct TagArgs {
    /// Name of the tag to create. If omitted, lists existing tags.
    name: Option<String>,

    /// Commit the tag should point at (default: @)
    #[arg(default_value = "@")]
    commit: String,
}

pub fn run(args: &TagArgs) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.name {
        Some(name) => {
            let oid = kit_repository::get_oid(&args.commit)?;
            kit_repository::create_tag(name, oid)?;
        }
        None => {
            for (name, _) in kit_repository::refs().iter_refs("refs/tags/", true)? {
                writeln!(out, "{}", name.trim_start_matches("refs/tags/"))?;
            }
        }
    }

    Ok(0)
}
