use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::{ControlSession, Reply};

pub async fn change_directory(session: &mut ControlSession, path: &str) -> FtpResult<Reply> {
    session
        .exchange(&FtpCommand::Cwd(path.to_string()), &[250])
        .await
}
