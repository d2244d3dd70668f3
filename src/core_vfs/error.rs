// Errors raised while walking the virtual filesystem
use crate::core_vfs::NodeKind;
use crate::reply::Reply;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Expected {expected} at {path}")]
    TypeMismatch { path: String, expected: NodeKind },
}

impl PathError {
    /// The reply for a lookup that fails outside of a data transfer.
    pub fn to_ftp_response(&self) -> Reply {
        Reply::file_unavailable()
    }
}
