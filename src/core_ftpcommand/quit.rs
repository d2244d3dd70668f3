use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::info;

/// Handles the QUIT FTP command.
///
/// Marks the session as closing. The session loop flushes the 221 reply and then
/// closes the connection without reading another command.
pub async fn handle_quit_command(session: &mut Session, _arg: String) -> HandlerResult {
    info!("[{}] Received QUIT command. Closing connection.", session.peer);
    session.closing = true;
    Ok(Reply::closing_control_connection())
}
