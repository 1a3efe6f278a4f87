mod config;
mod constants;
mod core_auth;
mod core_cli;
mod core_error;
mod core_ftpcommand;
mod core_listing;
mod core_log;
mod core_network;
mod core_walker;
mod helpers;
mod session;
#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::core_cli::output::{format_entry, format_feature};
use crate::core_cli::{Cli, Target};
use crate::core_ftpcommand::feat::feature_list;
use crate::core_ftpcommand::quit::quit;
use crate::core_ftpcommand::syst::system_type;
use crate::core_walker::{WalkOptions, Walker};
use crate::session::ControlSession;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    core_log::logger::init_logger(args.verbose);

    // Load configuration from the TOML file, if one was given
    let config = match args.config.as_deref() {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let target = Target::parse(&args.target)?;
    let username = args
        .user
        .clone()
        .or_else(|| target.username.clone())
        .unwrap_or_else(|| config.client.username.clone());
    let password = args
        .password
        .clone()
        .or_else(|| target.password.clone())
        .unwrap_or_else(|| config.client.password.clone());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current exchange");
            on_interrupt.cancel();
        }
    });

    let mut session = ControlSession::connect(
        &target.host,
        target.port,
        config.client.session_settings(),
    )
    .await
    .with_context(|| format!("Failed to connect to {}:{}", target.host, target.port))?;
    info!(
        "Greeting from {}:{}: {}",
        session.host(),
        session.port(),
        session.greeting().trim_end()
    );

    let outcome = run(&args, &target, &mut session, &username, &password, cancel).await;

    if let Err(e) = quit(&mut session).await {
        warn!("QUIT failed: {}", e);
    }
    session.disconnect().await?;

    outcome
}

async fn run(
    args: &Cli,
    target: &Target,
    session: &mut ControlSession,
    username: &str,
    password: &str,
    cancel: CancellationToken,
) -> Result<()> {
    core_auth::login(session, username, password)
        .await
        .context("Login failed")?;

    if args.features {
        let system = system_type(session).await.context("SYST failed")?;
        println!("System: {}", system);
        for record in feature_list(session).await.context("FEAT failed")? {
            println!("  {}", format_feature(&record));
        }
    }

    let options = WalkOptions {
        recurse: args.recurse,
        max_depth: args.depth,
    };
    let locator_base = helpers::locator_base(&target.host, target.port)
        .with_context(|| format!("Cannot build locators for {}", target.host))?;
    let walker = Walker::new(options, locator_base, cancel);

    let show_url = args.urls;
    let summary = walker
        .walk(session, &target.directory, &mut |entry| {
            println!("{}", format_entry(&entry, show_url));
        })
        .await
        .with_context(|| format!("Listing of {} failed", target.directory))?;

    info!(
        "{} entries, {} directories listed",
        summary.entries, summary.directories
    );
    Ok(())
}
