use std::io::{self, Read, Write};

use anyhow::Result;
use clap::Args;
use kit_object::ObjectType;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Read the object from stdin
    #[arg(long)]
    stdin: bool,

    /// Actually write the object into the object database
    #[arg(short = 'w')]
    write: bool,

    /// Object type (default: blob)
    #[arg(short = 't', default_value = "blob")]
    obj_type: ObjectType,

    /// Files to hash
    #[arg(value_name = "file")]
    files: Vec<String>,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.stdin {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        let oid = hash_and_maybe_write(&data, args.obj_type, args.write)?;
        writeln!(out, "{}", oid.to_hex())?;
    }

    for file in &args.files {
        let data = std::fs::read(file)?;
        let oid = hash_and_maybe_write(&data, args.obj_type, args.write)?;
        writeln!(out, "{}", oid.to_hex())?;
    }

    if !args.stdin && args.files.is_empty() {
        anyhow::bail!("nothing to hash: pass --stdin or at least one file");
    }

    Ok(0)
}

fn hash_and_maybe_write(
    data: &[u8],
    obj_type: ObjectType,
    write: bool,
) -> Result<kit_hash::ObjectId> {
    if write {
        Ok(kit_repository::odb().hash_object(data, obj_type)?)
    } else {
        Ok(kit_hash::hash_object(obj_type.as_str(), data))
    }
}
