// FTP reply catalog (RFC 959 section 4.2)
use std::fmt;
use std::net::SocketAddrV4;

pub const EOL: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyCode {
    FileStatusOk = 150,
    CommandOk = 200,
    SystemStatus = 211,
    FileStatus = 213,
    SystemType = 215,
    ServiceReady = 220,
    ClosingControlConnection = 221,
    ClosingDataConnection = 226,
    EnteringPassiveMode = 227,
    LoggedIn = 230,
    FileActionOk = 250,
    PathName = 257,
    NeedPassword = 331,
    CantOpenDataConnection = 425,
    TransferAborted = 426,
    ActionAborted = 450,
    NotImplemented = 502,
    FileUnavailable = 550,
}

impl ReplyCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A formatted outcome sent on the control connection.
///
/// Single-line replies are written as `"<code> <text>\r\n"`. Multi-line replies prefix
/// every line but the last with `"<code>-"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: ReplyCode,
    lines: Vec<String>,
}

impl Reply {
    pub fn new(code: ReplyCode, text: impl Into<String>) -> Self {
        Self {
            code,
            lines: vec![text.into()],
        }
    }

    /// Builds a multi-line reply. An empty `lines` is written as a single bare code line.
    pub fn multiline(code: ReplyCode, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    pub fn code(&self) -> ReplyCode {
        self.code
    }

    /// The exact bytes to put on the wire, terminator included.
    pub fn to_wire(&self) -> String {
        let mut out = String::new();
        let last = self.lines.len().saturating_sub(1);
        for (i, line) in self.lines.iter().enumerate() {
            let sep = if i == last { ' ' } else { '-' };
            out.push_str(&format!("{}{}{}{}", self.code, sep, line, EOL));
        }
        if self.lines.is_empty() {
            out.push_str(&format!("{} {}", self.code, EOL));
        }
        out
    }

    pub fn file_status_ok() -> Self {
        Self::new(ReplyCode::FileStatusOk, "File status okay; about to open data connection.")
    }

    pub fn command_ok() -> Self {
        Self::new(ReplyCode::CommandOk, "Command okay.")
    }

    /// FEAT listing: a header, one line per feature, then the "End" marker.
    pub fn features(features: &[&str]) -> Self {
        let mut lines = vec!["Features:".to_string()];
        lines.extend(features.iter().map(|feat| format!(" {}", feat)));
        lines.push("End".to_string());
        Self::multiline(ReplyCode::SystemStatus, lines)
    }

    pub fn file_status(status: impl fmt::Display) -> Self {
        Self::new(ReplyCode::FileStatus, status.to_string())
    }

    pub fn system_type() -> Self {
        Self::new(ReplyCode::SystemType, "UNIX Type: L8")
    }

    pub fn service_ready() -> Self {
        Self::new(ReplyCode::ServiceReady, "Service ready for new user.")
    }

    pub fn closing_control_connection() -> Self {
        Self::new(ReplyCode::ClosingControlConnection, "Service closing control connection.")
    }

    pub fn closing_data_connection() -> Self {
        Self::new(ReplyCode::ClosingDataConnection, "Closing data connection.")
    }

    pub fn entering_passive_mode(addr: SocketAddrV4) -> Self {
        let [h1, h2, h3, h4] = addr.ip().octets();
        let port = addr.port();
        Self::new(
            ReplyCode::EnteringPassiveMode,
            format!(
                "Entering Passive Mode ({},{},{},{},{},{})",
                h1,
                h2,
                h3,
                h4,
                port / 256,
                port % 256
            ),
        )
    }

    pub fn logged_in() -> Self {
        Self::new(ReplyCode::LoggedIn, "User logged in proceed.")
    }

    pub fn file_action_ok() -> Self {
        Self::new(ReplyCode::FileActionOk, "Requested file action okay completed.")
    }

    pub fn path_name(path: &str) -> Self {
        Self::new(ReplyCode::PathName, path)
    }

    pub fn need_password() -> Self {
        Self::new(ReplyCode::NeedPassword, "User name okay need password.")
    }

    pub fn cant_open_data_connection() -> Self {
        Self::new(ReplyCode::CantOpenDataConnection, "Can't open data connection.")
    }

    pub fn transfer_aborted() -> Self {
        Self::new(ReplyCode::TransferAborted, "Connection closed; transfer aborted.")
    }

    pub fn action_aborted() -> Self {
        Self::new(ReplyCode::ActionAborted, "Requested file action aborted.")
    }

    pub fn not_implemented() -> Self {
        Self::new(ReplyCode::NotImplemented, "Command not implemented.")
    }

    pub fn file_unavailable() -> Self {
        Self::new(ReplyCode::FileUnavailable, "File unavailable.")
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire().trim_end())
    }
}
