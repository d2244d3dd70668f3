use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;

pub async fn handle_pwd_command(session: &mut Session, _arg: String) -> HandlerResult {
    Ok(Reply::path_name(&session.current_dir))
}
