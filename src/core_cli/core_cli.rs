use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "rouillels",
    version,
    about = "Lists (and walks) remote directories over plain FTP."
)]
pub struct Cli {
    /// Server to list: ftp://[user[:password]@]host[:port][/directory], or a bare host
    pub target: String,

    /// Login name, overrides the URL and the configuration file
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password, overrides the URL and the configuration file
    #[arg(short, long)]
    pub password: Option<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recurse: bool,

    /// Deepest level to descend to with --recurse (the start directory is 0)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the system type and the FEAT capability list before listing
    #[arg(long)]
    pub features: bool,

    /// Print each entry's ftp:// locator instead of its path
    #[arg(long)]
    pub urls: bool,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
