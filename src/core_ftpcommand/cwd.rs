use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::{info, warn};

/// Handles the CWD (Change Working Directory) FTP command.
///
/// The target is validated against the filesystem before it is committed, so a failed
/// CWD never changes the working directory.
pub async fn handle_cwd_command(session: &mut Session, arg: String) -> HandlerResult {
    match session.change_dir(&arg) {
        Ok(()) => {
            info!("[{}] Changed directory to {}", session.peer, session.current_dir);
            Ok(Reply::file_action_ok())
        }
        Err(e) => {
            warn!("[{}] Failed to change directory: {}", session.peer, e);
            Ok(e.to_ftp_response())
        }
    }
}
