use crate::core_ftpcommand::handlers::HandlerResult;
use crate::core_network::pasv::{discard_data, transfer};
use crate::reply::Reply;
use crate::session::Session;
use log::{error, info, warn};

/// Handles the RETR (Retrieve) FTP command.
///
/// This function accepts one data connection and sends the full content of the file
/// over it. When `arg` does not name a file, the data connection is closed without
/// writing anything and the client gets a 450.
///
/// # Arguments
///
/// * `session` - The session issuing the command.
/// * `arg` - The path of the file to retrieve.
///
/// # Returns
///
/// The final reply for the control connection, or a fatal error if the 150 could not
/// be written.
pub async fn handle_retr_command(session: &mut Session, arg: String) -> HandlerResult {
    let path = session.absolute_path(&arg);

    let data_stream = match session.data_channel.accept_once().await {
        Ok(data_stream) => data_stream,
        Err(e) => {
            error!("[{}] {}", session.peer, e);
            return Ok(e.to_ftp_response());
        }
    };

    let vfs = session.vfs();
    let content = match vfs.resolve_file(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("[{}] RETR failed: {}", session.peer, e);
            discard_data(data_stream).await;
            return Ok(Reply::action_aborted());
        }
    };

    info!("[{}] Sending file: {}", session.peer, path);
    let reply = transfer(session, data_stream, content).await?;
    if reply == Reply::closing_data_connection() {
        info!("[{}] File transfer completed successfully: {}", session.peer, path);
    }
    Ok(reply)
}
