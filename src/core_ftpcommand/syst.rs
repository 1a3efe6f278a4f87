use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::ControlSession;
use log::info;

/// Sends SYST and returns the system type text, e.g. `UNIX Type: L8`.
pub async fn system_type(session: &mut ControlSession) -> FtpResult<String> {
    let reply = session.exchange(&FtpCommand::Syst, &[215]).await?;
    let system = reply.message().to_string();
    info!("Remote system type: {}", system);
    Ok(system)
}
