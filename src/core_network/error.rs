// Errors raised on the control and data connections
use crate::reply::Reply;
use std::io;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataChannelError {
    #[error("Failed to bind passive listener: {0}")]
    Bind(#[source] io::Error),

    #[error("Failed to accept data connection: {0}")]
    AcceptFailed(#[source] io::Error),
}

impl DataChannelError {
    pub fn to_ftp_response(&self) -> Reply {
        Reply::cant_open_data_connection()
    }
}

/// Errors that end a session. No reply is attempted once one of these is raised.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Failed to read from control connection: {0}")]
    ReadFailed(#[source] io::Error),

    #[error("Failed to write to control connection: {0}")]
    WriteFailed(#[source] io::Error),

    #[error("No command received within {0:?}")]
    IdleTimeout(Duration),

    #[error("Command line longer than {0} bytes")]
    LineTooLong(usize),

    #[error(transparent)]
    DataChannel(#[from] DataChannelError),
}
