pub mod date;
pub mod entry;
pub mod parser;

pub use entry::{ListingEntry, RemoteEntry};
pub use parser::{parse_line, parse_listing};
