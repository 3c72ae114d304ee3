mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use pmgr_core::{Session, SessionConfig};

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let session = connect_and_login(&cli.global).await?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &session, &cli.global).await
}

/// Every command talks to the service, and the service answers nothing
/// without a token, so connect and log in up front.
async fn connect_and_login(global: &GlobalOpts) -> Result<Session, CliError> {
    let config = SessionConfig {
        url: global.url.clone(),
        timeout: Duration::from_secs(global.timeout),
    };
    let session = Session::connect(&config)?;

    let (Some(username), Some(password)) = (&global.username, &global.password) else {
        return Err(CliError::NoCredentials);
    };
    session
        .login(username, &SecretString::from(password.clone()))
        .await?;

    Ok(session)
}
