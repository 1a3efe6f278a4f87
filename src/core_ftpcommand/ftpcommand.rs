use std::fmt;

/// Commands this client sends on the control connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FtpCommand {
    User(String),
    Pass(String),
    Feat,
    Syst,
    Pwd,
    Cwd(String),
    Pasv,
    List(Option<String>),
    Quit,
}

impl FtpCommand {
    pub fn verb(&self) -> &'static str {
        match self {
            FtpCommand::User(_) => "USER",
            FtpCommand::Pass(_) => "PASS",
            FtpCommand::Feat => "FEAT",
            FtpCommand::Syst => "SYST",
            FtpCommand::Pwd => "PWD",
            FtpCommand::Cwd(_) => "CWD",
            FtpCommand::Pasv => "PASV",
            FtpCommand::List(_) => "LIST",
            FtpCommand::Quit => "QUIT",
        }
    }

    /// The command line as sent to the server, without the trailing CRLF.
    pub fn wire(&self) -> String {
        match self {
            FtpCommand::User(arg) | FtpCommand::Pass(arg) | FtpCommand::Cwd(arg) => {
                format!("{} {}", self.verb(), arg)
            }
            FtpCommand::List(Some(path)) if !path.is_empty() => {
                format!("{} {}", self.verb(), path)
            }
            _ => self.verb().to_string(),
        }
    }
}

/// Log-safe rendering: identical to the wire form except that the password is masked.
impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpCommand::Pass(_) => write!(f, "PASS ****"),
            _ => write!(f, "{}", self.wire()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_forms() {
        assert_eq!(FtpCommand::User("anonymous".into()).wire(), "USER anonymous");
        assert_eq!(FtpCommand::Cwd("/pub/linux".into()).wire(), "CWD /pub/linux");
        assert_eq!(FtpCommand::List(None).wire(), "LIST");
        assert_eq!(FtpCommand::List(Some(String::new())).wire(), "LIST");
        assert_eq!(
            FtpCommand::List(Some("my file.txt".into())).wire(),
            "LIST my file.txt"
        );
        assert_eq!(FtpCommand::Pasv.wire(), "PASV");
    }

    #[test]
    fn test_display_masks_password() {
        let pass = FtpCommand::Pass("hunter2".into());
        assert_eq!(pass.wire(), "PASS hunter2");
        assert_eq!(pass.to_string(), "PASS ****");
        assert_eq!(FtpCommand::Feat.to_string(), "FEAT");
    }
}
