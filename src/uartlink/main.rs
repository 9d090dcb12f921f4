use std::process::ExitCode;

use clap::Parser;
use monitor::{MonitorOptions, handle_monitor};
use ports::handle_ports;
use tracing_subscriber::EnvFilter;

mod monitor;
mod ports;

#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
enum Cli {
    /// Open the UART, send a message every interval and print received lines
    #[command(name = "monitor", alias = "m")]
    Monitor(MonitorOptions),

    /// List serial ports known to the OS
    #[command(name = "ports")]
    Ports,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match &cli {
        Cli::Monitor(opts) if opts.verbose => "debug",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli {
        Cli::Monitor(opts) => handle_monitor(opts),
        Cli::Ports => match handle_ports() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::from(1)
            }
        },
    }
}
