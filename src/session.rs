use crate::core_network::error::ConnectionError;
use crate::core_network::pasv::DataChannel;
use crate::core_vfs::resolver::{canonical_path, join_path};
use crate::core_vfs::{NodeKind, PathError, VirtualFs};
use crate::reply::Reply;
use log::{debug, trace};
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Write half of a control connection.
pub type ControlWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Per-connection state. Only the command handlers of this connection touch it, one at
/// a time.
pub struct Session {
    pub peer: String,
    pub username: Option<String>,
    pub current_dir: String,
    pub type_: String, // Recorded from TYPE, not interpreted
    pub data_channel: DataChannel,
    pub closing: bool,
    vfs: Arc<VirtualFs>,
    control: ControlWriter,
}

impl Session {
    pub fn new(
        peer: impl Into<String>,
        control: ControlWriter,
        vfs: Arc<VirtualFs>,
        data_channel: DataChannel,
    ) -> Self {
        Self {
            peer: peer.into(),
            username: None,
            current_dir: String::from("/"),
            type_: "A".to_string(),
            data_channel,
            closing: false,
            vfs,
            control,
        }
    }

    /// Shared handle on the filesystem, so lookups don't hold a borrow on the session.
    pub fn vfs(&self) -> Arc<VirtualFs> {
        Arc::clone(&self.vfs)
    }

    /// Scopes a command argument to the working directory.
    pub fn absolute_path(&self, arg: &str) -> String {
        join_path(&self.current_dir, arg)
    }

    /// Moves to `arg` if it names a directory. The working directory is left untouched
    /// on failure.
    pub fn change_dir(&mut self, arg: &str) -> Result<(), PathError> {
        let path = self.absolute_path(arg);
        self.vfs.resolve(&path, NodeKind::Directory)?;
        self.current_dir = canonical_path(&path);
        Ok(())
    }

    /// Writes and flushes one reply on the control connection.
    pub async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        trace!("[{}] Sending reply: {}", self.peer, reply);
        self.control
            .write_all(reply.to_wire().as_bytes())
            .await
            .map_err(ConnectionError::WriteFailed)?;
        self.control.flush().await.map_err(ConnectionError::WriteFailed)
    }

    /// Closes the control writer. Errors are ignored: the peer may already be gone.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.control.shutdown().await {
            debug!("[{}] Failed to shut down control connection: {}", self.peer, e);
        }
    }
}
