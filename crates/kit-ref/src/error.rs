/// Error types for reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("symbolic ref loop detected at {0}")]
    SymrefLoop(String),

    #[error("{0}")]
    Util(#[from] kit_utils::UtilError),

    #[error("invalid ref content in {name}: {reason}")]
    MalformedRef { name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] kit_hash::HashError),
}
