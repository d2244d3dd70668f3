use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::debug;

/// Handles the TYPE FTP command.
///
/// The requested type is recorded as sent. Transfers are byte-for-byte whatever the
/// type, so no code is rejected.
pub async fn handle_type_command(session: &mut Session, arg: String) -> HandlerResult {
    debug!("[{}] Transfer type set to {:?}", session.peer, arg);
    session.type_ = arg;
    Ok(Reply::command_ok())
}
