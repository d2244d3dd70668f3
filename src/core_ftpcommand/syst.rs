use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::debug;

/// Handles the SYST (System) FTP command.
pub async fn handle_syst_command(session: &mut Session, _arg: String) -> HandlerResult {
    debug!("[{}] Responding to SYST command with system type.", session.peer);
    Ok(Reply::system_type())
}
