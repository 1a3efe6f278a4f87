use crate::config::SessionSettings;
use crate::constants::READ_BUFFER_SIZE;
use crate::core_error::{FtpError, FtpResult};
use log::{debug, trace};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Framing for replies that carry no length prefix.
///
/// The first read waits up to `receive_timeout`. After that, reading goes on
/// for as long as more bytes show up within `idle_wait`; the first quiet
/// period (or EOF) ends the unit. Back-to-back replies sent closer together
/// than `idle_wait` come back as one string.
#[derive(Debug, Clone, Copy)]
pub struct DrainPolicy {
    pub receive_timeout: Duration,
    pub idle_wait: Duration,
}

impl DrainPolicy {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            receive_timeout: settings.receive_timeout,
            idle_wait: settings.idle_wait,
        }
    }

    pub async fn drain<R>(&self, reader: &mut R) -> FtpResult<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut collected = Vec::new();

        let n = match timeout(self.receive_timeout, reader.read(&mut buffer)).await {
            Ok(result) => result?,
            Err(_) => return Err(FtpError::Timeout(self.receive_timeout)),
        };
        if n == 0 {
            return Ok(collected);
        }
        collected.extend_from_slice(&buffer[..n]);

        loop {
            match timeout(self.idle_wait, reader.read(&mut buffer)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => collected.extend_from_slice(&buffer[..n]),
                Ok(Err(e)) => return Err(FtpError::Io(e)),
                // Peer went quiet
                Err(_) => break,
            }
        }

        Ok(collected)
    }

    /// Reads until the peer closes its side. Every read waits at most
    /// `receive_timeout`; pauses shorter than that do not end the transfer.
    pub async fn drain_to_eof<R>(&self, reader: &mut R) -> FtpResult<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut collected = Vec::new();

        loop {
            match timeout(self.receive_timeout, reader.read(&mut buffer)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => collected.extend_from_slice(&buffer[..n]),
                Ok(Err(e)) => return Err(FtpError::Io(e)),
                Err(_) => return Err(FtpError::Timeout(self.receive_timeout)),
            }
        }

        Ok(collected)
    }
}

/// One TCP stream to the server, either the control or a data connection.
#[derive(Debug)]
pub struct Transport {
    stream: TcpStream,
    policy: DrainPolicy,
    peer: String,
}

impl Transport {
    pub async fn open(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        policy: DrainPolicy,
    ) -> FtpResult<Self> {
        let peer = format!("{}:{}", host, port);
        debug!("Connecting to {}", peer);

        let stream = match timeout(connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => {
                return Err(FtpError::Connection {
                    host: host.to_string(),
                    port,
                    source,
                })
            }
            Err(_) => {
                return Err(FtpError::Connection {
                    host: host.to_string(),
                    port,
                    source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
                })
            }
        };

        debug!("Connected to {}", peer);
        Ok(Self {
            stream,
            policy,
            peer,
        })
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Writes `line` followed by CRLF.
    pub async fn write_line(&mut self, line: &str) -> FtpResult<()> {
        let mut bytes = Vec::with_capacity(line.len() + 2);
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(b"\r\n");
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Reads everything the peer sends until it goes quiet.
    pub async fn read(&mut self) -> FtpResult<String> {
        let bytes = self.policy.drain(&mut self.stream).await?;
        trace!("{} IN: {} bytes", self.peer, bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads everything the peer sends until it closes the connection.
    pub async fn read_to_close(&mut self) -> FtpResult<String> {
        let bytes = self.policy.drain_to_eof(&mut self.stream).await?;
        trace!("{} IN: {} bytes until close", self.peer, bytes.len());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn close(mut self) -> FtpResult<()> {
        debug!("Closing connection to {}", self.peer);
        match self.stream.shutdown().await {
            Ok(()) => Ok(()),
            // The peer may already have closed its side
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(FtpError::Io(e)),
        }
    }
}
