//! Expense Snap CLI - Scan receipts and manage expenses from the terminal.

use clap::Parser;
use snap_cli::commands;
use snap_cli::{Cli, Command, Config, Formatter};
use snap_extractor::ReceiptExtractor;
use snap_llm::SharedProvider;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so piped output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> snap_cli::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Scan(args) => {
            let provider: SharedProvider = Arc::new(config.model.build());
            let extractor = ReceiptExtractor::new(provider, config.extractor.clone());
            let store = if args.save {
                Some(config.store.open()?)
            } else {
                None
            };
            commands::execute_scan(args, &extractor, store.as_ref(), &formatter).await?;
        }
        Command::List(args) => {
            commands::execute_list(args, &config.store.open()?, &formatter).await?
        }
        Command::Summary => commands::execute_summary(&config.store.open()?, &formatter).await?,
        Command::Add(args) => commands::execute_add(args, &config.store.open()?, &formatter).await?,
        Command::Edit(args) => {
            commands::execute_edit(args, &config.store.open()?, &formatter).await?
        }
        Command::Delete(args) => {
            commands::execute_delete(args, &config.store.open()?, &formatter).await?
        }
    }

    Ok(())
}
