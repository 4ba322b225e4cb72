//! mpris-remote - control an MPRIS media player from the command line.
//!
//! Picks a player (explicitly or by probing the configured candidates),
//! runs one action against it and reports the result on stdout and, for
//! short notices, as a desktop notification.

use std::{error::Error, path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use mpris_remote::{
    cli::{
        CliService, CommandOutput,
        formatting::{format_candidates, format_error},
    },
    config::Config,
    services::{
        DesktopNotifier,
        mpris::{DbusTransport, DiscoveryError, EndpointDiscovery, Session, Transport},
    },
    tracing_config,
};
use tracing::{debug, info};

const PROGRAM: &str = "mpris-remote";

#[derive(Parser)]
#[command(name = PROGRAM, version)]
#[command(about = "Control MPRIS media players from the command line")]
struct Cli {
    /// Player to control, e.g. vlc. Probes the configured candidates if omitted
    #[arg(short, long)]
    player: Option<String>,

    /// List the reachable players and exit
    #[arg(short, long)]
    list: bool,

    /// Do not show desktop notifications
    #[arg(long)]
    no_notify: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    config_schema: bool,

    /// Configuration file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Action to run, see the list printed without one
    action: Option<String>,

    /// Arguments for the action
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.config_schema {
        return match Config::schema_json() {
            Ok(schema) => {
                println!("{schema}");
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e.to_string()),
        };
    }

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => return fail(&e.to_string()),
    };

    if let Err(e) = tracing_config::init(config.general.log_level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => fail(&e.to_string()),
    }
}

async fn connect(
    config: &Config,
) -> Result<(Arc<dyn Transport>, EndpointDiscovery), Box<dyn Error>> {
    let transport: Arc<dyn Transport> = Arc::new(DbusTransport::session().await?);
    let discovery = EndpointDiscovery::with_candidates(
        Arc::clone(&transport),
        config.discovery.candidates.iter().cloned(),
    );
    Ok((transport, discovery))
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{}", format_error(message));
    ExitCode::FAILURE
}

async fn run(cli: Cli, config: Config) -> Result<ExitCode, Box<dyn Error>> {
    let service = CliService::new();

    if !cli.list && cli.action.is_none() {
        println!("{}", service.usage(PROGRAM));
        println!();
        match connect(&config).await {
            Ok((_, discovery)) => println!("{}", format_candidates(&discovery.enumerate().await)),
            Err(e) => eprintln!("{}", format_error(&e.to_string())),
        }
        return Ok(ExitCode::FAILURE);
    }

    let (transport, discovery) = connect(&config).await?;

    if cli.list {
        println!("{}", format_candidates(&discovery.enumerate().await));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(action) = cli.action else {
        return Ok(ExitCode::FAILURE);
    };

    service.registry().resolve(&action, &cli.args)?;

    let player = match cli.player {
        Some(player) => player,
        None => match discovery.resolve_default().await {
            Ok(candidate) => candidate.id,
            Err(DiscoveryError::NoPlayerFound) => {
                println!("No MPRIS connection found.");
                return Ok(ExitCode::FAILURE);
            }
            Err(DiscoveryError::AmbiguousPlayer(candidates)) => {
                println!("Multiple MPRIS connections found.");
                println!("{}", format_candidates(&candidates));
                return Ok(ExitCode::FAILURE);
            }
        },
    };

    let session = Session::bind(transport, &player).await?;
    info!(player = %session.player_id(), %action, "Running action");

    match service.execute_command(&session, &action, &cli.args).await? {
        CommandOutput::Notice(message) => {
            println!("{message}");
            if cli.no_notify {
                debug!("Notifications disabled on the command line");
            } else {
                DesktopNotifier::connect(&config.notifications)
                    .await
                    .notify(session.identity(), session.player_id(), &message)
                    .await;
            }
            Ok(ExitCode::SUCCESS)
        }
        CommandOutput::Report(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        CommandOutput::Status(true) | CommandOutput::Nothing => Ok(ExitCode::SUCCESS),
        CommandOutput::Status(false) => Ok(ExitCode::FAILURE),
    }
}
