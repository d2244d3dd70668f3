use crate::core_ftpcommand::error::ProtocolError;
use std::fmt;
use std::str::FromStr;

#[allow(clippy::upper_case_acronyms)]
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    SYST,
    FEAT,
    PWD,
    CWD,
    TYPE,
    SIZE,
    MDTM,
    PASV,
    LIST,
    RETR,
    QUIT,
}

impl FromStr for FtpCommand {
    type Err = ProtocolError;

    /// Verbs are matched exactly: `user` is not `USER`.
    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        match verb {
            "USER" => Ok(FtpCommand::USER),
            "PASS" => Ok(FtpCommand::PASS),
            "SYST" => Ok(FtpCommand::SYST),
            "FEAT" => Ok(FtpCommand::FEAT),
            "PWD" => Ok(FtpCommand::PWD),
            "CWD" => Ok(FtpCommand::CWD),
            "TYPE" => Ok(FtpCommand::TYPE),
            "SIZE" => Ok(FtpCommand::SIZE),
            "MDTM" => Ok(FtpCommand::MDTM),
            "PASV" => Ok(FtpCommand::PASV),
            "LIST" => Ok(FtpCommand::LIST),
            "RETR" => Ok(FtpCommand::RETR),
            "QUIT" => Ok(FtpCommand::QUIT),
            _ => Err(ProtocolError::UnknownCommand(verb.to_string())),
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub argument: String,
}

impl Command {
    /// Splits a line at its first space. Only the line terminator is stripped, so
    /// stray whitespace stays part of the verb or the argument.
    pub fn parse(line: &str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (verb, argument) = line.split_once(' ').unwrap_or((line, ""));
        Self {
            verb: verb.to_string(),
            argument: argument.to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verb == "PASS" {
            return write!(f, "PASS ****");
        }
        if self.argument.is_empty() {
            write!(f, "{}", self.verb)
        } else {
            write!(f, "{} {}", self.verb, self.argument)
        }
    }
}
