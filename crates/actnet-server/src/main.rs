//! `actnet-server` HTTP daemon

use actnet_server::routes;
use actnet_service::logging::{self, LogFormat};
use actnet_service::{ActnetConfig, NetworkService};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("actnet-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve activity network datasets over HTTP")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_parser(value_parser!(SocketAddr))
                .help("Listen address, e.g. 127.0.0.1:3000"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the CSV files"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Write logs to stderr as JSON"),
        )
}

fn resolve_config(matches: &ArgMatches) -> anyhow::Result<ActnetConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ActnetConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ActnetConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("data-dir") {
        config = config.with_data_dir(dir);
    }
    if let Some(bind) = matches.get_one::<SocketAddr>("bind") {
        config = config.with_bind(*bind);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init(format, "info");

    let config = resolve_config(&matches)?;
    let service = Arc::new(NetworkService::new(&config).context("invalid configuration")?);
    let app = routes(service, &config.server.cors_origins)?;

    let (addr, server) = warp::serve(app)
        .try_bind_with_graceful_shutdown(config.server.bind, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(%err, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("binding {}", config.server.bind))?;

    tracing::info!(
        %addr,
        data_dir = %config.dataset.data_dir.display(),
        "actnet server listening"
    );
    server.await;
    tracing::info!("actnet server stopped");
    Ok(())
}
