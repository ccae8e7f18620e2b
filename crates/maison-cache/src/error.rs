use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// The key-value store could not be opened by name.
    #[error("cannot open store {name:?}: {reason}")]
    Open { name: String, reason: String },

    /// A stored value did not match the type it was read as.
    #[error("bad stored value: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("store backend: {0}")]
    Backend(String),
}
