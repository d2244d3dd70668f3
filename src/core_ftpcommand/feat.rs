use crate::core_ftpcommand::handlers::HandlerResult;
use crate::reply::Reply;
use crate::session::Session;

// Extensions beyond RFC 959 that this server answers.
const FEATURES: &[&str] = &["MDTM", "SIZE"];

pub async fn handle_feat_command(_session: &mut Session, _arg: String) -> HandlerResult {
    Ok(Reply::features(FEATURES))
}
