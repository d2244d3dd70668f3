use crate::config::Config;
use crate::core_ftpcommand::ftpcommand::Command;
use crate::core_ftpcommand::handlers::{dispatch, initialize_command_handlers, CommandHandlers};
use crate::core_network::error::ConnectionError;
use crate::core_network::pasv::DataChannel;
use crate::core_vfs::VirtualFs;
use crate::reply::Reply;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tokio::time::timeout;

/// Longest command line accepted, terminator included.
pub const MAX_COMMAND_LINE: usize = 4096;

pub async fn start_server(config: Arc<Config>, vfs: Arc<VirtualFs>) -> Result<()> {
    let address = format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    );
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind control listener on {}", address))?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, config, vfs).await
}

/// Accepts control connections forever, one task per connection.
pub async fn serve(listener: TcpListener, config: Arc<Config>, vfs: Arc<VirtualFs>) -> Result<()> {
    let handlers = Arc::new(initialize_command_handlers());

    loop {
        let (socket, addr) = listener
            .accept()
            .await
            .context("Failed to accept control connection")?;
        info!("New connection from {:?}", addr);

        let config = Arc::clone(&config);
        let vfs = Arc::clone(&vfs);
        let handlers = Arc::clone(&handlers);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, addr.to_string(), config, vfs, handlers).await {
                error!("Connection error for {:?}: {}", addr, e);
            }
            info!("Connection closed for {:?}", addr);
        });
    }
}

/// Runs one session over `stream` until QUIT, EOF, idle timeout or an I/O failure.
///
/// The data channel and the control writer are released on every exit path.
pub async fn handle_connection<S>(
    stream: S,
    peer: String,
    config: Arc<Config>,
    vfs: Arc<VirtualFs>,
    handlers: Arc<CommandHandlers>,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let data_channel =
        DataChannel::bind(config.server.pasv_address, config.server.data_timeout()).await?;

    let (reader, writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut session = Session::new(peer, Box::new(writer), vfs, data_channel);

    let result = run_session(
        &mut session,
        &mut reader,
        &handlers,
        config.server.idle_timeout(),
    )
    .await;

    session.shutdown().await;
    result
}

async fn run_session<R>(
    session: &mut Session,
    reader: &mut R,
    handlers: &CommandHandlers,
    idle_timeout: Duration,
) -> Result<(), ConnectionError>
where
    R: AsyncBufRead + Unpin,
{
    session.send_reply(&Reply::service_ready()).await?;

    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let mut line = (&mut *reader).take(MAX_COMMAND_LINE as u64);
        let n = match timeout(idle_timeout, line.read_until(b'\n', &mut buffer)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(ConnectionError::ReadFailed(e)),
            Err(_) => return Err(ConnectionError::IdleTimeout(idle_timeout)),
        };

        if n == 0 {
            debug!("[{}] Client disconnected", session.peer);
            return Ok(());
        }
        if n == MAX_COMMAND_LINE && !buffer.ends_with(b"\n") {
            return Err(ConnectionError::LineTooLong(MAX_COMMAND_LINE));
        }

        let command = Command::parse(&String::from_utf8_lossy(&buffer));
        debug!("[{}] Received command: {}", session.peer, command);

        // A command still waiting on the data channel is abandoned when the client
        // hangs up. Pipelined input is left in the buffer for the next iteration.
        let outcome = tokio::select! {
            biased;
            reply = dispatch(handlers, session, command) => Some(reply?),
            closed = wait_for_hangup(reader) => {
                closed?;
                None
            }
        };
        let Some(reply) = outcome else {
            debug!("[{}] Client disconnected during command", session.peer);
            return Ok(());
        };
        session.send_reply(&reply).await?;

        if session.closing {
            return Ok(());
        }
    }
}

/// Resolves once the control connection reaches EOF, without consuming any input.
async fn wait_for_hangup<R>(reader: &mut R) -> Result<(), ConnectionError>
where
    R: AsyncBufRead + Unpin,
{
    match reader.fill_buf().await {
        Ok([]) => Ok(()),
        Ok(_) => std::future::pending().await,
        Err(e) => Err(ConnectionError::ReadFailed(e)),
    }
}
