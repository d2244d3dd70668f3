// Errors raised while parsing a command line
use crate::reply::Reply;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),
}

impl ProtocolError {
    pub fn to_ftp_response(&self) -> Reply {
        match self {
            ProtocolError::UnknownCommand(_) => Reply::not_implemented(),
        }
    }
}
