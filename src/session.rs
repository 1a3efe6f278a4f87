use crate::config::SessionSettings;
use crate::core_error::{FtpError, FtpResult};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::transport::{DrainPolicy, Transport};
use log::{debug, info};

/// A control reply whose code was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub code: u16,
    pub text: String,
}

impl Reply {
    /// Text of the first line after the code and its separator.
    pub fn message(&self) -> &str {
        let first_line = self.text.lines().next().unwrap_or_default();
        first_line.get(4..).unwrap_or_default().trim_end()
    }
}

/// Leading three-digit code of a reply, if it has one.
pub fn reply_code(response: &str) -> Option<u16> {
    response
        .get(..3)
        .filter(|code| code.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|code| code.parse().ok())
}

/// Accepts `response` only if it starts with one of the `accepted` codes.
pub fn check_response(response: &str, accepted: &[u16], context: &str) -> FtpResult<Reply> {
    let accepted_prefix = accepted
        .iter()
        .find(|code| response.starts_with(&code.to_string()));

    match accepted_prefix {
        Some(&code) => Ok(Reply {
            code,
            text: response.to_string(),
        }),
        None => Err(FtpError::Protocol {
            context: context.to_string(),
            expected: accepted
                .iter()
                .map(|code| code.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            code: reply_code(response),
            response: response.trim_end().to_string(),
        }),
    }
}

/// The live FTP control connection. One transport per session; reconnecting
/// means building a new session.
#[derive(Debug)]
pub struct ControlSession {
    host: String,
    port: u16,
    transport: Transport,
    settings: SessionSettings,
    greeting: String,
}

impl ControlSession {
    /// Opens the control connection and captures the server greeting.
    pub async fn connect(host: &str, port: u16, settings: SessionSettings) -> FtpResult<Self> {
        let mut transport = Transport::open(
            host,
            port,
            settings.connect_timeout,
            DrainPolicy::from_settings(&settings),
        )
        .await?;

        let greeting = transport.read().await?;
        info!("Connected to {}:{}", host, port);
        debug!("CC IN: {}", greeting.trim_end());

        Ok(Self {
            host: host.to_string(),
            port,
            transport,
            settings,
            greeting,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub async fn send(&mut self, command: &FtpCommand) -> FtpResult<()> {
        debug!("CC OUT: {}", command);
        self.transport.write_line(&command.wire()).await
    }

    pub async fn read(&mut self) -> FtpResult<String> {
        let response = self.transport.read().await?;
        debug!("CC IN: {}", response.trim_end());
        Ok(response)
    }

    /// Write then read.
    pub async fn query(&mut self, command: &FtpCommand) -> FtpResult<String> {
        self.send(command).await?;
        self.read().await
    }

    /// Sends `command` and validates the reply against `accepted`.
    pub async fn exchange(&mut self, command: &FtpCommand, accepted: &[u16]) -> FtpResult<Reply> {
        let response = self.query(command).await?;
        check_response(&response, accepted, &command.to_string())
    }

    /// Closes the control connection. Consumes the session.
    pub async fn disconnect(self) -> FtpResult<()> {
        info!("Disconnecting from {}:{}", self.host, self.port);
        self.transport.close().await
    }
}
