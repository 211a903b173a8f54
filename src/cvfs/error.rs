use thiserror::Error;

/// Coarse error categories shared by every UI client.
///
/// Clients that only care about "what went wrong" (exit codes, colouring,
/// test assertions) match on this instead of the full [`CvfsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    NotADirectory,
    AtRoot,
    CapacityExceeded,
    EmptyHistory,
    Usage,
    Io,
}

#[derive(Error, Debug)]
pub enum CvfsError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Document type not allowed: {0}")]
    DisallowedType(String),

    #[error("Invalid criterion: {0}")]
    InvalidCriterion(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} is not a directory")]
    NotADirectory(String),

    #[error("Already at the root directory")]
    AtRoot,

    #[error("Disk space exceeded: {required} > {capacity}")]
    CapacityExceeded { required: u64, capacity: u64 },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("No virtual disk loaded")]
    NoDisk,

    #[error("Usage: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl CvfsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CvfsError::InvalidName(_)
            | CvfsError::DisallowedType(_)
            | CvfsError::InvalidCriterion(_) => ErrorKind::Validation,
            CvfsError::Duplicate(_) => ErrorKind::Duplicate,
            CvfsError::NotFound(_) => ErrorKind::NotFound,
            CvfsError::NotADirectory(_) => ErrorKind::NotADirectory,
            CvfsError::AtRoot => ErrorKind::AtRoot,
            CvfsError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            CvfsError::NothingToUndo | CvfsError::NothingToRedo => ErrorKind::EmptyHistory,
            CvfsError::NoDisk | CvfsError::Usage(_) => ErrorKind::Usage,
            CvfsError::Io(_) | CvfsError::Serialization(_) | CvfsError::Snapshot(_) => {
                ErrorKind::Io
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CvfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_errors_share_a_kind() {
        assert_eq!(CvfsError::NothingToUndo.kind(), ErrorKind::EmptyHistory);
        assert_eq!(CvfsError::NothingToRedo.kind(), ErrorKind::EmptyHistory);
    }

    #[test]
    fn capacity_message_names_both_sizes() {
        let err = CvfsError::CapacityExceeded {
            required: 370,
            capacity: 200,
        };
        assert_eq!(err.to_string(), "Disk space exceeded: 370 > 200");
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    }
}
