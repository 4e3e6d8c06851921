//! priocache server binary.
//!
//! Binds a TCP listener, shares one cache across all connections, and
//! serves until interrupted.

use priocache::cache::Cache;
use priocache::connection::{handle_connection, ConnectionStats};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Server configuration
struct Config {
    /// Address to bind to
    addr: String,
    /// Log every command at debug level
    verbose: bool,
    /// Cache byte budget
    max_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: priocache::DEFAULT_ADDR.to_string(),
            verbose: false,
            max_bytes: priocache::DEFAULT_MAX_BYTES,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--addr" | "-a" => {
                    if i + 1 < args.len() {
                        config.addr = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --addr requires a value");
                        std::process::exit(1);
                    }
                }
                "--max-bytes" | "-m" => {
                    if i + 1 < args.len() {
                        config.max_bytes = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid byte budget");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --max-bytes requires a value");
                        std::process::exit(1);
                    }
                }
                "--verbose" | "-v" => {
                    config.verbose = true;
                    i += 1;
                }
                "--version" => {
                    println!("priocache version {}", priocache::VERSION);
                    std::process::exit(0);
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }
}

fn print_help() {
    println!(
        r#"
priocache - A Priority-Evicting In-Memory Cache Server

USAGE:
    priocache [OPTIONS]

OPTIONS:
    -a, --addr <ADDR>        Address to listen on (default: 0.0.0.0:9336)
    -m, --max-bytes <BYTES>  Cache byte budget (default: 4194304)
    -v, --verbose            Log every command
        --version            Print version information
        --help               Print this help message

EXAMPLES:
    priocache                          # Listen on 0.0.0.0:9336 with a 4 MiB budget
    priocache -a 127.0.0.1:9400        # Bind a different address
    priocache -m 67108864 -v           # 64 MiB budget, verbose logging
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    // Quiet unless asked; -v logs every command.
    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    let cache = Arc::new(Cache::new(config.max_bytes));
    let stats = Arc::new(ConnectionStats::new());

    let listener = TcpListener::bind(&config.addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind to address {}: {}", config.addr, e))?;
    info!(addr = %config.addr, max_bytes = config.max_bytes, "Listening");

    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    tokio::select! {
        _ = accept_loop(listener, cache, stats) => {}
        _ = shutdown => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(listener: TcpListener, cache: Arc<Cache>, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let cache = Arc::clone(&cache);
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    handle_connection(stream, addr, cache, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
