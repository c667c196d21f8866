#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Invalid vertex offset {index} for coordinate sequence of length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("Malformed coordinate sequence: {0}")]
    Parse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Failed to encode value for key {key:?}: {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

pub type Result<T, E = EditError> = std::result::Result<T, E>;
