pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;
pub mod merge_base;
pub mod push;
pub mod read_tree;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
pub mod write_tree;

use anyhow::Result;
use clap::Subcommand;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository
    Init(init::InitArgs),
    /// Compute an object id and optionally write it to the object database
    HashObject(hash_object::HashObjectArgs),
    /// Show the content, type, or size of a repository object
    CatFile(cat_file::CatFileArgs),
    /// Create a tree object from the current index
    WriteTree(write_tree::WriteTreeArgs),
    /// Materialize a tree object into the working directory
    ReadTree(read_tree::ReadTreeArgs),
    /// Add file contents to the index
    Add(add::AddArgs),
    /// Record the staged changes as a new commit
    Commit(commit::CommitArgs),
    /// Show commit history
    Log(log::LogArgs),
    /// Show a commit and its changes
    Show(show::ShowArgs),
    /// Show changes between trees
    Diff(diff::DiffArgs),
    /// Switch to a branch or detach onto a commit
    Checkout(checkout::CheckoutArgs),
    /// Create a tag
    Tag(tag::TagArgs),
    /// List or create branches
    Branch(branch::BranchArgs),
    /// Show branch, merge, and staging state
    Status(status::StatusArgs),
    /// Move HEAD to a commit
    Reset(reset::ResetArgs),
    /// Merge another commit into the current branch
    Merge(merge::MergeArgs),
    /// Find the common ancestor of two commits
    MergeBase(merge_base::MergeBaseArgs),
    /// Copy objects and refs from another repository directory
    Fetch(fetch::FetchArgs),
    /// Copy objects and a ref to another repository directory
    Push(push::PushArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree(args) => write_tree::run(args),
        Commands::ReadTree(args) => read_tree::run(args),
        Commands::Add(args) => add::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Show(args) => show::run(args),
        Commands::Diff(args) => diff::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::Tag(args) => tag::run(args),
        Commands::Branch(args) => branch::run(args),
        Commands::Status(args) => status::run(args),
        Commands::Reset(args) => reset::run(args),
        Commands::Merge(args) => merge::run(args),
        Commands::MergeBase(args) => merge_base::run(args),
        Commands::Fetch(args) => fetch::run(args),
        Commands::Push(args) => push::run(args),
    }
}
