// src/core_ftpcommand/pwd.rs
use crate::core_error::{FtpError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::ControlSession;
use once_cell::sync::Lazy;
use regex::Regex;

// First quoted segment; an embedded quote is written twice
static QUOTED_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"]|"")*)""#).expect("PWD regex is valid"));

/// Extracts the directory from a 257 reply.
pub fn parse_pwd_reply(response: &str) -> FtpResult<String> {
    QUOTED_PATH_RE
        .captures(response)
        .map(|caps| caps[1].replace("\"\"", "\""))
        .ok_or_else(|| FtpError::parse("PWD reply", response.trim_end()))
}

pub async fn current_directory(session: &mut ControlSession) -> FtpResult<String> {
    let reply = session.exchange(&FtpCommand::Pwd, &[257]).await?;
    parse_pwd_reply(&reply.text)
}
