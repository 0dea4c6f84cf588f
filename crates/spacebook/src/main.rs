mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use spacebook_api::{ApiClient, Transport};
use spacebook_config::KeyringTokenStore;
use spacebook_core::Portal;

use crate::cli::{Cli, Command, GlobalOpts};
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
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "spacebook", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the backend through a Portal
        cmd => {
            let portal = build_portal(&cli.global)?;
            portal.init().await;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &portal, &cli.global).await
        }
    }
}

/// Build a `Portal` from the config file, profile, and CLI overrides.
fn build_portal(global: &GlobalOpts) -> Result<Portal, CliError> {
    let cfg = spacebook_config::load_config_or_default()?;
    let (profile_name, profile) = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => (name.to_owned(), profile.clone()),
        // A --base-url override works without any configured profile.
        Err(spacebook_config::ConfigError::UnknownProfile(name))
            if global.base_url.is_some() =>
        {
            (name, spacebook_config::Profile::default())
        }
        Err(err) => return Err(err.into()),
    };

    let base_url = global.base_url.as_deref().unwrap_or(&profile.base_url);
    let url: url::Url = base_url.parse().map_err(|_| CliError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {base_url}"),
    })?;

    let transport = Transport {
        timeout: Duration::from_secs(global.timeout.unwrap_or(profile.timeout_secs)),
        danger_accept_invalid_certs: global.insecure || profile.insecure,
        ..Transport::default()
    };
    let api = ApiClient::new(url, &transport).map_err(spacebook_core::CoreError::from)?;

    let tokens = Arc::new(KeyringTokenStore::new(&profile_name));
    Ok(Portal::new(api, tokens))
}
