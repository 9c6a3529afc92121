use clap::Parser;
use cli::{Cli, exit_status, run};
use std::process;

fn main() {
    // Initialize tracing. Predictions go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {:#}", err);
        process::exit(exit_status(&err));
    }
}
