//! Main entry point for the DeepL CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deepl_cli::cli::commands::{self, Args};
use deepl_cli::{ConfigLoader, SystemClipboard};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let mut stdout = std::io::stdout();
    match commands::run(args, ConfigLoader::new(), &mut SystemClipboard, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_usage_error() => {
            println!("{}", e);
            ExitCode::from(e.exit_code())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr; stdout carries only results
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("deepl_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deepl_cli=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
