use crate::core_ftpcommand::error::ProtocolError;
use crate::core_ftpcommand::ftpcommand::{Command, FtpCommand};
use crate::core_ftpcommand::{cwd, feat, list, mdtm, pass, pwd, quit, retr, size, syst, type_, user};
use crate::core_network::error::ConnectionError;
use crate::core_network::pasv;
use crate::reply::Reply;
use crate::session::Session;
use log::warn;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// What a handler produces: the final reply, or a fatal control-connection error.
pub type HandlerResult = Result<Reply, ConnectionError>;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = HandlerResult> + Send + 'a>>;

pub type CommandHandler = for<'a> fn(&'a mut Session, String) -> HandlerFuture<'a>;

pub type CommandHandlers = HashMap<FtpCommand, CommandHandler>;

pub fn initialize_command_handlers() -> CommandHandlers {
    let mut handlers: CommandHandlers = HashMap::new();

    handlers.insert(FtpCommand::USER, |session, arg| {
        Box::pin(user::handle_user_command(session, arg))
    });

    handlers.insert(FtpCommand::PASS, |session, arg| {
        Box::pin(pass::handle_pass_command(session, arg))
    });

    handlers.insert(FtpCommand::SYST, |session, arg| {
        Box::pin(syst::handle_syst_command(session, arg))
    });

    handlers.insert(FtpCommand::FEAT, |session, arg| {
        Box::pin(feat::handle_feat_command(session, arg))
    });

    handlers.insert(FtpCommand::PWD, |session, arg| {
        Box::pin(pwd::handle_pwd_command(session, arg))
    });

    handlers.insert(FtpCommand::CWD, |session, arg| {
        Box::pin(cwd::handle_cwd_command(session, arg))
    });

    handlers.insert(FtpCommand::TYPE, |session, arg| {
        Box::pin(type_::handle_type_command(session, arg))
    });

    handlers.insert(FtpCommand::SIZE, |session, arg| {
        Box::pin(size::handle_size_command(session, arg))
    });

    handlers.insert(FtpCommand::MDTM, |session, arg| {
        Box::pin(mdtm::handle_mdtm_command(session, arg))
    });

    handlers.insert(FtpCommand::PASV, |session, arg| {
        Box::pin(pasv::handle_pasv_command(session, arg))
    });

    handlers.insert(FtpCommand::LIST, |session, arg| {
        Box::pin(list::handle_list_command(session, arg))
    });

    handlers.insert(FtpCommand::RETR, |session, arg| {
        Box::pin(retr::handle_retr_command(session, arg))
    });

    handlers.insert(FtpCommand::QUIT, |session, arg| {
        Box::pin(quit::handle_quit_command(session, arg))
    });

    handlers
}

/// Runs the handler registered for `command.verb`.
///
/// Unknown verbs get a 502 and leave the session as it was.
pub async fn dispatch(
    handlers: &CommandHandlers,
    session: &mut Session,
    command: Command,
) -> HandlerResult {
    let handler = command
        .verb
        .parse::<FtpCommand>()
        .and_then(|cmd| {
            handlers
                .get(&cmd)
                .copied()
                .ok_or_else(|| ProtocolError::UnknownCommand(command.verb.clone()))
        });

    match handler {
        Ok(handler) => handler(session, command.argument).await,
        Err(e) => {
            warn!("[{}] {}", session.peer, e);
            Ok(e.to_ftp_response())
        }
    }
}
