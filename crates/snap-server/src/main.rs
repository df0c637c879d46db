//! Expense Snap server binary
//!
//! Starts the HTTP server for receipt extraction and expense management.

use snap_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults (SQLite at expenses.db)");
        eprintln!("Usage: snap-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Expense Snap Server - Receipt extraction and expense ledger");
    println!();
    println!("USAGE:");
    println!("    snap-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    GOOGLE_API_KEY     Gemini API key (required for /api/process-image)");
    println!("    SUPABASE_KEY       Project key when [store] backend = \"postgrest\"");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address, bind_port (default 127.0.0.1:3000)");
    println!("    - [model]: endpoint, model, api_key, api_key_env, timeout_secs");
    println!("    - [store]: backend = \"sqlite\" (path) or \"postgrest\" (url, table)");
    println!("    - [extractor]: max_image_bytes, model_timeout_secs");
    println!();
}
