use clap::Parser;
use sfcc_meta_sync::cli::{self, Cli};
use sfcc_meta_sync::ui::{ConsoleReporter, Reporter};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    use env_logger::Builder;
    use log::LevelFilter;

    let level = if cli.command.connection().debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .init();

    let reporter = ConsoleReporter::new();
    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            reporter.error(&format!("Could not resolve the working directory: {}", err));
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&cli, &project_root, &reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            reporter.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
