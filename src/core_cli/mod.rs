pub mod core_cli;
pub mod output;
pub mod target;

pub use self::core_cli::Cli;
pub use self::target::Target;
