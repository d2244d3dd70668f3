use crate::core_ftpcommand::handlers::HandlerResult;
use crate::core_ftpcommand::utils::placeholder_mtime;
use crate::reply::Reply;
use crate::session::Session;
use log::warn;

pub async fn handle_mdtm_command(session: &mut Session, arg: String) -> HandlerResult {
    let path = session.absolute_path(&arg);
    let vfs = session.vfs();

    if let Err(e) = vfs.resolve_file(&path) {
        warn!("[{}] MDTM failed: {}", session.peer, e);
        return Ok(e.to_ftp_response());
    }

    Ok(Reply::file_status(placeholder_mtime().format("%Y%m%d%H%M%S")))
}
