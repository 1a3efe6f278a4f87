use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::ControlSession;
use log::info;

/// Sends QUIT. The caller still disconnects afterwards.
pub async fn quit(session: &mut ControlSession) -> FtpResult<()> {
    let reply = session.exchange(&FtpCommand::Quit, &[221]).await?;
    info!("Server said goodbye: {}", reply.message());
    Ok(())
}
