use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Accel(args) => args.run(),
        Command::Simulate(args) => args.run(),
    }
}

/// Logs go to stderr so that traces written to stdout stay machine-readable.
/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(name = "glide", about = "Time-optimal single-axis convergence tooling")]
struct Cli {
    /// Increase log verbosity (-v for per-tick logs).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the acceleration for a single tick.
    Accel(cli::accel::AccelArgs),
    /// Run a scenario until the axis settles on its final target.
    Simulate(cli::simulate::SimulateArgs),
}
