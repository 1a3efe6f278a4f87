// src/constants.rs

pub const DEFAULT_PORT: u16 = 21;
pub const DEFAULT_USERNAME: &str = "anonymous";
pub const DEFAULT_PASSWORD: &str = "anonymous@";
pub const DEFAULT_DIRECTORY: &str = "/";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IDLE_WAIT_MS: u64 = 200;

pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Separator between a symlink name and its target in a long listing.
pub const SYMLINK_SEPARATOR: &str = " -> ";
