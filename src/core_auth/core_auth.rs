use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::ControlSession;
use log::info;

/// Logs in with USER/PASS.
///
/// USER must answer 331 (password needed) or 220, PASS must answer 331 or 230.
/// The first rejected exchange aborts; there is no retry.
///
/// # Arguments
///
/// * `session` - The open control session.
/// * `username` - Sent verbatim with USER.
/// * `password` - Sent with PASS, never logged.
///
/// # Returns
///
/// FtpResult<()>, failing with `FtpError::Protocol` carrying the raw server reply.
pub async fn login(session: &mut ControlSession, username: &str, password: &str) -> FtpResult<()> {
    session
        .exchange(&FtpCommand::User(username.to_string()), &[331, 220])
        .await?;
    let reply = session
        .exchange(&FtpCommand::Pass(password.to_string()), &[331, 230])
        .await?;

    info!("Logged in as {}: {}", username, reply.message());
    Ok(())
}
