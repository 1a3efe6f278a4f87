//! Scripted FTP server used by the protocol and walker tests.
//!
//! Each [`Step`] expects one command line from the client and answers it.
//! The server task asserts on every command it receives and returns the
//! full transcript when the script is exhausted and the client hangs up.

use crate::config::{PassiveAddressMode, SessionSettings};
use crate::session::ControlSession;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub const TEST_IDLE_WAIT: Duration = Duration::from_millis(50);

/// Gap the server leaves between the end of a transfer and its 226 reply.
/// Comfortably larger than [`TEST_IDLE_WAIT`] so the replies stay apart.
pub const COMPLETION_GAP: Duration = Duration::from_millis(250);

pub enum Step {
    /// Expect `expect`, answer with `reply` (CRLF appended).
    Reply { expect: String, reply: String },
    /// Expect `expect`, answer in several writes separated by `gap`.
    Chunks {
        expect: String,
        chunks: Vec<String>,
        gap: Duration,
    },
    /// Expect PASV, open a data listener and advertise `address` with its port.
    Pasv { address: [u8; 4] },
    /// Expect `expect`, send 150, stream `listing` over the data connection,
    /// close it and send 226. With `merged` the 226 follows without a gap.
    List {
        expect: String,
        listing: String,
        merged: bool,
    },
    /// Like `List`, but the data arrives in `chunks` with `gap` between them.
    PausedList {
        expect: String,
        chunks: Vec<String>,
        gap: Duration,
    },
    /// Like `List`, but the opening reply is a two-line 150 sent in one write.
    MultilineList { expect: String, listing: String },
}

impl Step {
    pub fn reply(expect: &str, reply: &str) -> Self {
        Step::Reply {
            expect: expect.to_string(),
            reply: reply.to_string(),
        }
    }

    pub fn pasv() -> Self {
        Step::Pasv {
            address: [127, 0, 0, 1],
        }
    }

    pub fn list(expect: &str, listing: &str) -> Self {
        Step::List {
            expect: expect.to_string(),
            listing: listing.to_string(),
            merged: false,
        }
    }

    pub fn pwd(directory: &str) -> Self {
        Step::reply("PWD", &format!("257 \"{}\" is the current directory", directory))
    }

    pub fn cwd_ok(path: &str) -> Self {
        Step::reply(&format!("CWD {}", path), "250 Directory successfully changed.")
    }

    /// The full PWD / PASV / LIST sequence of one listing.
    pub fn listing(directory: &str, list_command: &str, listing: &str) -> Vec<Self> {
        vec![
            Step::pwd(directory),
            Step::pasv(),
            Step::list(list_command, listing),
        ]
    }
}

pub fn test_settings() -> SessionSettings {
    SessionSettings {
        connect_timeout: Duration::from_secs(2),
        receive_timeout: Duration::from_secs(2),
        idle_wait: TEST_IDLE_WAIT,
        passive_address: PassiveAddressMode::ControlHost,
    }
}

pub struct MockServer {
    pub port: u16,
    handle: JoinHandle<Vec<String>>,
}

impl MockServer {
    pub async fn start(steps: Vec<Step>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            serve(socket, steps).await
        });
        Self { port, handle }
    }

    pub async fn connect(&self) -> ControlSession {
        ControlSession::connect("127.0.0.1", self.port, test_settings())
            .await
            .unwrap()
    }

    /// Waits for the script to finish and returns every command received.
    pub async fn transcript(self) -> Vec<String> {
        self.handle.await.unwrap()
    }
}

async fn serve(socket: TcpStream, steps: Vec<Step>) -> Vec<String> {
    let (read_half, mut writer) = socket.into_split();
    let mut reader = BufReader::new(read_half);
    let mut transcript = Vec::new();
    let mut data_listener: Option<TcpListener> = None;

    writer
        .write_all(b"220 rouillels test server ready.\r\n")
        .await
        .unwrap();

    for step in steps {
        let command = match next_command(&mut reader).await {
            Some(command) => command,
            None => return transcript,
        };
        transcript.push(command.clone());

        match step {
            Step::Reply { expect, reply } => {
                assert_eq!(command, expect);
                writer
                    .write_all(format!("{}\r\n", reply).as_bytes())
                    .await
                    .unwrap();
            }
            Step::Chunks {
                expect,
                chunks,
                gap,
            } => {
                assert_eq!(command, expect);
                for chunk in chunks {
                    writer.write_all(chunk.as_bytes()).await.unwrap();
                    sleep(gap).await;
                }
            }
            Step::Pasv { address } => {
                assert_eq!(command, "PASV");
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                let port = listener.local_addr().unwrap().port();
                let response = format!(
                    "227 Entering Passive Mode ({},{},{},{},{},{}).\r\n",
                    address[0],
                    address[1],
                    address[2],
                    address[3],
                    port / 256,
                    port % 256
                );
                data_listener = Some(listener);
                writer.write_all(response.as_bytes()).await.unwrap();
            }
            Step::List {
                expect,
                listing,
                merged,
            } => {
                assert_eq!(command, expect);
                let listener = data_listener.take().expect("LIST without PASV");
                let opening = "150 Here comes the directory listing.\r\n";
                let gap = if merged { Duration::ZERO } else { COMPLETION_GAP };
                transfer(&mut writer, listener, opening, vec![listing], Duration::ZERO, gap).await;
            }
            Step::PausedList {
                expect,
                chunks,
                gap,
            } => {
                assert_eq!(command, expect);
                let listener = data_listener.take().expect("LIST without PASV");
                let opening = "150 Here comes the directory listing.\r\n";
                transfer(&mut writer, listener, opening, chunks, gap, COMPLETION_GAP).await;
            }
            Step::MultilineList { expect, listing } => {
                assert_eq!(command, expect);
                let listener = data_listener.take().expect("LIST without PASV");
                let opening = "150-Opening ASCII mode data connection\r\n150 for file list.\r\n";
                transfer(
                    &mut writer,
                    listener,
                    opening,
                    vec![listing],
                    Duration::ZERO,
                    COMPLETION_GAP,
                )
                .await;
            }
        }
    }

    // Keep the control connection open until the client hangs up
    while let Some(command) = next_command(&mut reader).await {
        transcript.push(command);
    }
    transcript
}

/// Sends `opening`, streams `chunks` over the data connection, closes it and
/// sends 226 after `completion_gap`.
async fn transfer<W>(
    writer: &mut W,
    listener: TcpListener,
    opening: &str,
    chunks: Vec<String>,
    chunk_gap: Duration,
    completion_gap: Duration,
) where
    W: AsyncWrite + Unpin,
{
    writer.write_all(opening.as_bytes()).await.unwrap();
    let (mut data_stream, _) = listener.accept().await.unwrap();
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter().enumerate() {
        data_stream.write_all(chunk.as_bytes()).await.unwrap();
        if i < last {
            sleep(chunk_gap).await;
        }
    }
    data_stream.shutdown().await.unwrap();
    drop(data_stream);
    if !completion_gap.is_zero() {
        sleep(completion_gap).await;
    }
    writer.write_all(b"226 Directory send OK.\r\n").await.unwrap();
}

async fn next_command<R>(reader: &mut R) -> Option<String>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}
