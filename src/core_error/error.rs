// Error types shared by the protocol, listing and walker modules
use std::io;
use std::time::Duration;
use thiserror::Error;

pub type FtpResult<T> = Result<T, FtpError>;

#[derive(Error, Debug)]
pub enum FtpError {
    #[error("Failed to connect to {host}:{port}: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on open connection: {0}")]
    Io(#[from] io::Error),

    #[error("No response received within {0:?}")]
    Timeout(Duration),

    #[error("{context}: expected {expected}, got {response:?}")]
    Protocol {
        context: String,
        expected: String,
        code: Option<u16>,
        response: String,
    },

    #[error("Failed to parse {context}: {input:?}")]
    Parse { context: String, input: String },

    #[error("No such file or directory: {path} ({response})")]
    Path { path: String, response: String },

    #[error("Operation cancelled")]
    Cancelled,
}

impl FtpError {
    pub fn parse(context: impl Into<String>, input: impl Into<String>) -> Self {
        FtpError::Parse {
            context: context.into(),
            input: input.into(),
        }
    }

    /// Returns the three-digit reply code carried by a protocol error, if any.
    pub fn reply_code(&self) -> Option<u16> {
        match self {
            FtpError::Protocol { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_code_only_for_protocol_errors() {
        let err = FtpError::Protocol {
            context: "CWD /pub".to_string(),
            expected: "250".to_string(),
            code: Some(550),
            response: "550 Failed to change directory.".to_string(),
        };
        assert_eq!(err.reply_code(), Some(550));
        assert_eq!(FtpError::parse("listing line", "total 4").reply_code(), None);
        assert_eq!(FtpError::Cancelled.reply_code(), None);
    }

    #[test]
    fn test_protocol_error_message_carries_response() {
        let err = FtpError::Protocol {
            context: "USER anonymous".to_string(),
            expected: "331, 220".to_string(),
            code: Some(530),
            response: "530 Not logged in.".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("USER anonymous"));
        assert!(message.contains("331, 220"));
        assert!(message.contains("530 Not logged in."));
    }
}
