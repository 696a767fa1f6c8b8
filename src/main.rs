use anyhow::Result;
use clap::Parser;
use netlinx_rpc::cli::{Cli, Commands};
use netlinx_rpc::commands;
use netlinx_rpc::observability::install_panic_hook;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    install_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Generate { sources, output } => {
            commands::generate::generate_dispatcher(&sources, output)
        }
        Commands::List { sources, output } => commands::list::list_functions(&sources, output),
        Commands::Init { force } => commands::init::init_config(force),
    }
}

// RUST_LOG wins over -v flags when set.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("netlinx_rpc={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
