use clap::Parser;
use tracing_subscriber::EnvFilter;
use watchme_git::cli::{self, Cli};
use watchme_git::output;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.config().log_filter());

    if let Err(err) = cli::run(cli) {
        output::print_error(&err);
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
