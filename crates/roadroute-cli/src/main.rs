use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadroute_cli::args::{parse_coordinate, AlgorithmArg, SnapArg};
use roadroute_cli::output::OutputFormat;
use roadroute_lib::Coordinate;

mod commands;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Snap coordinates to a road network and find shortest routes")]
struct Cli {
    /// Road network to load: a directory with nodes.csv/edges.csv or a .json file.
    /// Falls back to ROADROUTE_NETWORK, then the platform data directory.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two coordinates.
    Route(RouteArgs),
    /// Report the network node closest to a coordinate.
    Snap(SnapArgs),
    /// Print node and edge counts for the network.
    Info,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Start point as LAT,LON.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    from: Coordinate,
    /// Destination point as LAT,LON.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    to: Coordinate,
    /// Shortest-path engine.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Dijkstra)]
    algorithm: AlgorithmArg,
    /// Nearest-node lookup strategy.
    #[arg(long, value_enum, default_value_t = SnapArg::Linear)]
    snap: SnapArg,
}

#[derive(Args, Debug)]
struct SnapArgs {
    /// Point to snap as LAT,LON.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    at: Coordinate,
    /// Nearest-node lookup strategy.
    #[arg(long, value_enum, default_value_t = SnapArg::Linear)]
    snap: SnapArg,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let network = cli.network.as_deref();

    match cli.command {
        Command::Route(args) => commands::route::handle_route_command(
            network,
            cli.format,
            &RouteCommandArgs {
                from: args.from,
                to: args.to,
                algorithm: args.algorithm.into(),
                snap: args.snap.into(),
            },
        ),
        Command::Snap(args) => {
            commands::snap::handle_snap_command(network, cli.format, args.at, args.snap.into())
        }
        Command::Info => commands::info::handle_info_command(network, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
