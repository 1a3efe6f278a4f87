pub mod pasv;
pub mod transport;
