use clap::Parser;
use ptpmap_runner::{log_filter, run, Args};
use tracing::error;

fn main() {
    let args = Args::parse();

    let env_directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, env_directives.as_deref()))
        .init();

    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }
}
