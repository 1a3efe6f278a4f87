// Here's the list of the FTP commands the client sends
pub mod cwd;
pub mod feat;
pub mod list;
pub mod pwd;
pub mod quit;
pub mod syst;

// The command enum shared by all of them
pub mod ftpcommand;
