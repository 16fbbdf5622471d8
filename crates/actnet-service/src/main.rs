//! `actnet` command-line interface

use actnet_service::logging::{self, LogFormat};
use actnet_service::{ActnetConfig, NetworkService, Operation};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

const CONFIG_EXIT: i32 = 3;

fn cli() -> Command {
    let operation = |name: &'static str, about: &'static str| {
        Command::new(name).about(about).arg(
            Arg::new("pretty")
                .long("pretty")
                .action(ArgAction::SetTrue)
                .help("Pretty-print the JSON output"),
        )
    };

    Command::new("actnet")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Activity network dataset validation")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the CSV files"),
        )
        .arg(
            Arg::new("report-unresolved")
                .long("report-unresolved")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("List matrix cells and activities the link scan skipped"),
        )
        .arg(
            Arg::new("diagnostics")
                .long("diagnostics")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Attach precedence network diagnostics"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs to stderr as JSON"),
        )
        .subcommand(operation("activities", "Validate and print activity properties"))
        .subcommand(operation("adjacency", "Validate and print the adjacency matrix"))
        .subcommand(operation("combined", "Build precedence links from both files"))
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
    if matches.get_flag("report-unresolved") {
        config.graph = config.graph.with_report_unresolved(true);
    }
    if matches.get_flag("diagnostics") {
        config.graph = config.graph.with_diagnostics(true);
    }
    Ok(config)
}

async fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    let (operation, args) = match matches.subcommand() {
        Some(("activities", args)) => (Operation::Activities, args),
        Some(("adjacency", args)) => (Operation::Adjacency, args),
        Some(("combined", args)) => (Operation::CombinedGraph, args),
        _ => anyhow::bail!("unknown subcommand"),
    };

    let config = resolve_config(matches)?;
    let service = NetworkService::new(&config).context("invalid configuration")?;
    tracing::debug!(?service, "service ready");

    let reply = service.run(operation).await;
    println!("{}", reply.to_json(args.get_flag("pretty"))?);
    Ok(reply.exit_code())
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init(format, "info");

    let code = match run(&matches).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            CONFIG_EXIT
        }
    };
    std::process::exit(code);
}
