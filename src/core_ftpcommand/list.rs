use crate::core_error::FtpResult;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::pwd::current_directory;
use crate::core_network::pasv::open_passive_channel;
use crate::session::{check_response, reply_code, ControlSession, Reply};
use log::{debug, trace, warn};

/// Raw LIST output together with the working directory it was taken in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub directory: String,
    pub raw: String,
}

/// A completion reply the drain already picked up behind the 150 reply.
/// Continuation lines of the 150 reply itself carry its code and are skipped.
fn trailing_reply(opening: &Reply) -> Option<&str> {
    opening
        .text
        .lines()
        .skip(1)
        .filter(|line| matches!(reply_code(line), Some(code) if code != opening.code))
        .last()
}

/// Runs PWD, PASV and LIST, reads the data connection until the server
/// closes it and confirms the transfer with 226.
///
/// An empty `path` lists the current directory with a bare LIST.
pub async fn list(session: &mut ControlSession, path: &str) -> FtpResult<Listing> {
    let directory = current_directory(session).await?;
    let mut channel = open_passive_channel(session).await?;
    debug!("Data connection open to {}", channel.peer());

    let command = if path.is_empty() {
        FtpCommand::List(None)
    } else {
        FtpCommand::List(Some(path.to_string()))
    };

    let opening = match session.exchange(&command, &[150]).await {
        Ok(reply) => reply,
        Err(e) => {
            if let Err(close_err) = channel.close().await {
                warn!("Failed to close data connection: {}", close_err);
            }
            return Err(e);
        }
    };

    let drained = channel.read_to_close().await;
    // The data connection goes away before the completion check, whatever happens next
    if let Err(e) = channel.close().await {
        warn!("Failed to close data connection: {}", e);
    }
    let raw = drained?;
    trace!("Listing data: {:?}", raw);

    let context = format!("{} completion", command);
    match trailing_reply(&opening) {
        Some(line) => {
            check_response(line, &[226], &context)?;
        }
        None => {
            let response = session.read().await?;
            check_response(&response, &[226], &context)?;
        }
    }

    debug!(
        "Listed {} in {} ({} bytes)",
        if path.is_empty() { "." } else { path },
        directory,
        raw.len()
    );
    Ok(Listing { directory, raw })
}
