use crate::core_ftpcommand::handlers::HandlerResult;
use crate::core_network::error::DataChannelError;
use crate::reply::Reply;
use crate::session::Session;
use log::{debug, error, info, warn};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// The passive-mode listener of a session.
///
/// It is bound once when the session starts and every LIST/RETR accepts exactly one
/// connection on it. The listener is released when the session is dropped.
#[derive(Debug)]
pub struct DataChannel {
    listener: TcpListener,
    address: SocketAddrV4,
    accept_timeout: Duration,
}

impl DataChannel {
    /// Binds an ephemeral port on `ip`.
    pub async fn bind(ip: Ipv4Addr, accept_timeout: Duration) -> Result<Self, DataChannelError> {
        let listener = TcpListener::bind((ip, 0))
            .await
            .map_err(DataChannelError::Bind)?;
        let port = listener.local_addr().map_err(DataChannelError::Bind)?.port();
        debug!("PASV listener set up on IP: {}, Port: {}", ip, port);

        Ok(Self {
            listener,
            address: SocketAddrV4::new(ip, port),
            accept_timeout,
        })
    }

    pub fn address(&self) -> SocketAddrV4 {
        self.address
    }

    /// Waits for the client to open the data connection.
    ///
    /// Gives up after the configured accept timeout so a client that never connects
    /// cannot park the session forever. A connection that arrives after the timeout
    /// stays queued on the listener until the next PASV discards it.
    pub async fn accept_once(&self) -> Result<TcpStream, DataChannelError> {
        match timeout(self.accept_timeout, self.listener.accept()).await {
            Ok(Ok((data_stream, addr))) => {
                info!("Accepted data connection from: {}", addr);
                Ok(data_stream)
            }
            Ok(Err(e)) => Err(DataChannelError::AcceptFailed(e)),
            Err(_) => Err(DataChannelError::AcceptFailed(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no data connection within {:?}", self.accept_timeout),
            ))),
        }
    }

    /// Drops every connection already waiting on the listener.
    ///
    /// Returns how many were dropped.
    pub async fn discard_pending(&self) -> usize {
        let mut discarded = 0;
        while let Ok(Ok((_, addr))) = timeout(Duration::ZERO, self.listener.accept()).await {
            warn!("Discarding stale data connection from: {}", addr);
            discarded += 1;
        }
        discarded
    }
}

/// Writes `payload` over an accepted data connection and closes it.
pub async fn send_data<W>(mut data_stream: W, payload: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    data_stream.write_all(payload).await?;
    data_stream.shutdown().await
}

/// Announces the transfer with a 150, then sends `payload` over `data_stream`.
///
/// A failed write only aborts the transfer (426); the session carries on.
pub async fn transfer<W>(session: &mut Session, data_stream: W, payload: &[u8]) -> HandlerResult
where
    W: AsyncWrite + Unpin,
{
    session.send_reply(&Reply::file_status_ok()).await?;

    if let Err(e) = send_data(data_stream, payload).await {
        error!("[{}] Data transfer failed: {}", session.peer, e);
        return Ok(Reply::transfer_aborted());
    }

    Ok(Reply::closing_data_connection())
}

/// Closes an accepted data connection without sending anything.
pub async fn discard_data(mut data_stream: TcpStream) {
    if let Err(e) = data_stream.shutdown().await {
        debug!("Failed to shut down unused data connection: {}", e);
    }
}

/// Handles the PASV command by advertising the session's data listener.
pub async fn handle_pasv_command(session: &mut Session, _arg: String) -> HandlerResult {
    let address = session.data_channel.address();
    session.data_channel.discard_pending().await;
    info!("[{}] Entering passive mode on {}", session.peer, address);
    Ok(Reply::entering_passive_mode(address))
}
