use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::info;

/// Handles the USER FTP command.
///
/// This function records the username for the session and requests the password from
/// the client. Every name is accepted, including an empty one.
///
/// # Arguments
///
/// * `session` - The session issuing the command.
/// * `username` - The username provided by the client.
///
/// # Returns
///
/// Always a 331 reply.
pub async fn handle_user_command(session: &mut Session, username: String) -> HandlerResult {
    info!("[{}] Received USER command with username: {}", session.peer, username);
    session.username = Some(username);
    Ok(Reply::need_password())
}
