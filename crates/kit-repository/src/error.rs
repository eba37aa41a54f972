use kit_hash::ObjectId;

/// Errors produced by the repository context, orchestrator, and replication.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("unknown name: {0}")]
    UnknownName(String),

    #[error("a merge is already in progress (MERGE_HEAD present)")]
    MergeInProgress,

    #[error("repository already exists at {0}")]
    AlreadyExists(std::path::PathBuf),

    #[error("malformed tree entry at {path:?}: {reason}")]
    MalformedTreeEntry { path: String, reason: String },

    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),

    #[error(transparent)]
    Odb(#[from] kit_odb::OdbError),

    #[error(transparent)]
    Ref(#[from] kit_ref::RefError),

    #[error(transparent)]
    Object(#[from] kit_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] kit_hash::HashError),

    #[error(transparent)]
    Revwalk(#[from] kit_revwalk::RevWalkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Util(#[from] kit_utils::UtilError),
}
