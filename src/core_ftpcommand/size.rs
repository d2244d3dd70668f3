use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::{info, warn};

/// Handles the SIZE (File Size) FTP command.
///
/// # Arguments
///
/// * `session` - The session issuing the command.
/// * `arg` - The path of the file, absolute or relative to the working directory.
///
/// # Returns
///
/// A 213 reply carrying the byte length, or 550 when `arg` is not a file.
pub async fn handle_size_command(session: &mut Session, arg: String) -> HandlerResult {
    let path = session.absolute_path(&arg);
    let vfs = session.vfs();

    match vfs.resolve_file(&path) {
        Ok(content) => {
            info!("[{}] File size for {} is {}", session.peer, path, content.len());
            Ok(Reply::file_status(content.len()))
        }
        Err(e) => {
            warn!("[{}] SIZE failed: {}", session.peer, e);
            Ok(e.to_ftp_response())
        }
    }
}
