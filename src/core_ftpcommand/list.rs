use crate::core_ftpcommand::handlers::HandlerResult;
use crate::core_ftpcommand::utils::{placeholder_mtime, strip_list_options};
use crate::core_network::pasv::{discard_data, transfer};
use crate::core_vfs::Node;
use crate::reply::Reply;
use crate::session::Session;
use log::{error, info, warn};

/// Handles the LIST FTP command.
///
/// Accepts one data connection, writes a `ls -l` style line per child of the target
/// directory (the working directory when no path is given) and closes it. Children
/// are listed in no particular order.
pub async fn handle_list_command(session: &mut Session, arg: String) -> HandlerResult {
    let path = session.absolute_path(strip_list_options(&arg));

    let data_stream = match session.data_channel.accept_once().await {
        Ok(data_stream) => data_stream,
        Err(e) => {
            error!("[{}] {}", session.peer, e);
            return Ok(e.to_ftp_response());
        }
    };

    let vfs = session.vfs();
    let children = match vfs.resolve_dir(&path) {
        Ok(children) => children,
        Err(e) => {
            warn!("[{}] LIST failed: {}", session.peer, e);
            discard_data(data_stream).await;
            return Ok(Reply::action_aborted());
        }
    };

    let listing: String = children
        .iter()
        .map(|(name, node)| format_list_entry(name, node))
        .collect();

    let reply = transfer(session, data_stream, listing.as_bytes()).await?;
    if reply == Reply::closing_data_connection() {
        info!("[{}] Listed {} entries of {}", session.peer, children.len(), path);
    }
    Ok(reply)
}

fn format_list_entry(name: &str, node: &Node) -> String {
    let file_type = if node.is_dir() { 'd' } else { '-' };
    format!(
        "{}rwxr-xr-x  1 owner group {} {} {}\r\n",
        file_type,
        node.size(),
        placeholder_mtime().format("%b %d %H:%M"),
        name
    )
}
