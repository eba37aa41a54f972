use std::io::{self, Write};

use anyhow::{bail, Result};
use bstr::ByteSlice;
use clap::Args;
use kit_hash::ObjectId;
use kit_object::{Object, ObjectType};

#[derive(Args)]
pub struct CatFileArgs {
    /// Show object type
    #[arg(short = 't', conflicts_with_all = ["size", "pretty"])]
    type_only: bool,

    /// Show object size
    #[arg(short = 's', conflicts_with_all = ["type_only", "pretty"])]
    size: bool,

    /// Pretty-print the object content
    #[arg(short = 'p', conflicts_with_all = ["type_only", "size"])]
    pretty: bool,

    /// Either <object> (with -t/-s/-p) or <type> <object>
    #[arg(value_name = "arg")]
    positional: Vec<String>,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let odb = kit_repository::odb();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (obj_type, object_str) = if args.type_only || args.size || args.pretty {
        if args.positional.is_empty() {
            bail!("missing object argument");
        }
        (None, args.positional[0].as_str())
    } else if args.positional.len() >= 2 {
        let parsed_type: ObjectType = args.positional[0]
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid object type: {}", args.positional[0]))?;
        (Some(parsed_type), args.positional[1].as_str())
    } else if args.positional.len() == 1 {
        (None, args.positional[0].as_str())
    } else {
        bail!("missing arguments; usage: cat-file (-t | -s | -p | <type>) <object>");
    };

    let oid = resolve_object(object_str)?;

    if args.type_only {
        let (actual, _) = odb.get_object_with_type(&oid)?;
        writeln!(out, "{actual}")?;
        return Ok(0);
    }

    if args.size {
        let (_, content) = odb.get_object_with_type(&oid)?;
        writeln!(out, "{}", content.len())?;
        return Ok(0);
    }

    let (actual, content) = odb.get_object_with_type(&oid)?;
    if let Some(expected) = obj_type {
        if actual != expected {
            bail!("expected {expected} but got {actual}");
        }
        out.write_all(&content)?;
        return Ok(0);
    }

    let obj = Object::parse_content(actual, &content)?;
    pretty_print(&obj, &mut out)?;
    Ok(0)
}

fn resolve_object(spec: &str) -> Result<ObjectId> {
    if let Ok(oid) = ObjectId::from_hex(spec) {
        return Ok(oid);
    }
    if let Ok(oid) = kit_repository::get_oid(spec) {
        return Ok(oid);
    }
    bail!("object not found: {spec}");
}

fn pretty_print(obj: &Object, out: &mut impl Write) -> Result<()> {
    match obj {
        Object::Blob(blob) => {
            out.write_all(&blob.data)?;
        }
        Object::Tree(tree) => {
            for entry in tree.iter() {
                let type_name = match entry.kind {
                    kit_object::EntryKind::Blob => "blob",
                    kit_object::EntryKind::Tree => "tree",
                };
                writeln!(out, "{} {}\t{}", type_name, entry.oid, entry.name.as_bstr())?;
            }
        }
        Object::Commit(commit) => {
            writeln!(out, "tree {}", commit.tree)?;
            for parent in &commit.parents {
                writeln!(out, "parent {parent}")?;
            }
            writeln!(out)?;
            out.write_all(&commit.message)?;
        }
    }
    Ok(())
}
