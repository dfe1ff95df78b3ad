use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = issue_chars::cli::args::Args::parse();
    init_logging(args.verbose);

    let tokens = issue_chars::credential::EnvTokenSource::default();
    match issue_chars::run::run(args, &tokens, None).await {
        Ok(_) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to count chars: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
