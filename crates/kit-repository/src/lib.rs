//! Repository context, the snapshot/merge orchestrator, and local
//! replication: the layer that ties the object store, reference store,
//! tree codec, index, diff engine, merge engine, and commit graph together
//! into `init`/`commit`/`checkout`/`reset`/`merge`/`fetch`/`push`.
//!
//! There is no `Repository` struct. Every operation here resolves against
//! whichever directory currently sits on top of the scoped binding in
//! [`context`] — that binding, not an explicit handle, is what replication
//! rebinds to talk to a peer repository.

pub mod commits;
pub mod context;
pub mod error;
pub mod index;
pub mod init;
pub mod name_resolution;
pub mod orchestrator;
pub mod replication;
pub mod stores;
pub mod tree;

pub use error::RepoError;

pub use commits::get_commit;
pub use context::{current_dir, is_ignored, with_repo_dir, working_dir, REPO_DIR_NAME};
pub use index::{add, get_index, get_index_tree, with_index};
pub use init::init;
pub use name_resolution::get_oid;
pub use orchestrator::{
    checkout, commit, create_branch, create_tag, merge, reset, status, MergeOutcome, Status,
};
pub use replication::{fetch, push};
pub use stores::{odb, refs};
pub use tree::{get_tree, get_working_tree, read_tree, write_files, write_tree};
