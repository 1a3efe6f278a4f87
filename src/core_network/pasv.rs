use crate::config::PassiveAddressMode;
use crate::core_error::{FtpError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::transport::{DrainPolicy, Transport};
use crate::session::ControlSession;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;

// 227 Entering Passive Mode (h1,h2,h3,h4,p1,p2).
static PASV_TUPLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)")
        .expect("PASV regex is valid")
});

/// The address and port decoded from a PASV reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveEndpoint {
    pub address: Ipv4Addr,
    pub port: u16,
}

/// Decodes the six-number tuple of a PASV reply.
pub fn parse_pasv_reply(response: &str) -> FtpResult<PassiveEndpoint> {
    let caps = PASV_TUPLE_RE
        .captures(response)
        .ok_or_else(|| FtpError::parse("PASV reply", response.trim_end()))?;

    let mut numbers = [0u8; 6];
    for (i, number) in numbers.iter_mut().enumerate() {
        *number = caps[i + 1]
            .parse()
            .map_err(|_| FtpError::parse("PASV reply", response.trim_end()))?;
    }

    Ok(PassiveEndpoint {
        address: Ipv4Addr::new(numbers[0], numbers[1], numbers[2], numbers[3]),
        port: u16::from(numbers[4]) * 256 + u16::from(numbers[5]),
    })
}

/// Sends PASV and decodes the data endpoint the server opened.
pub async fn enter_passive(session: &mut ControlSession) -> FtpResult<PassiveEndpoint> {
    let reply = session.exchange(&FtpCommand::Pasv, &[227]).await?;
    let endpoint = parse_pasv_reply(&reply.text)?;
    trace!("Passive endpoint: {}:{}", endpoint.address, endpoint.port);
    Ok(endpoint)
}

/// Negotiates passive mode and opens the data connection for one transfer.
pub async fn open_passive_channel(session: &mut ControlSession) -> FtpResult<Transport> {
    let endpoint = enter_passive(session).await?;
    let settings = *session.settings();

    let host = match settings.passive_address {
        PassiveAddressMode::ControlHost => session.host().to_string(),
        PassiveAddressMode::Reply => endpoint.address.to_string(),
    };
    debug!("Opening passive data connection to {}:{}", host, endpoint.port);

    Transport::open(
        &host,
        endpoint.port,
        settings.connect_timeout,
        DrainPolicy::from_settings(&settings),
    )
    .await
}
