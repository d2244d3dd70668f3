use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;
use log::info;

// No credential check: any password logs the user in.
pub async fn handle_pass_command(session: &mut Session, _password: String) -> HandlerResult {
    info!(
        "[{}] User {} logged in",
        session.peer,
        session.username.as_deref().unwrap_or("<unknown>")
    );
    Ok(Reply::logged_in())
}
