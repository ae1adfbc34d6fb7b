use clap::Parser;
use penport::{run, Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Holds `ACCESS_TOKEN`; optional.
const SECRET_FILE: &str = ".penport-secret";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = dotenvy::from_filename(SECRET_FILE) {
        if !err.not_found() {
            eprintln!("Export failed: could not read {SECRET_FILE}: {err}");
            std::process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Export(args) => run(&args),
    };
    if let Err(err) = result {
        eprintln!("Export failed: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "penport=debug,penport_core=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
