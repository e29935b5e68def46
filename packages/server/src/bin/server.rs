//! Line-protocol chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- 6667
//! cargo run --bin hiroba-server -- 0 hiroba.conf --host 0.0.0.0
//! ```
//!
//! The bound address is printed on stdout; logs go to stderr.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    ServerError,
    config::ServerConfig,
    infrastructure::repository::{InMemoryAccountRepository, InMemoryChannelRepository},
    ui::{AppState, Server},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Line-protocol chat server with channels", long_about = None)]
struct Args {
    /// Port number to bind the server to (0 picks an ephemeral port)
    port: u16,

    /// Configuration file (read at startup, reserved for future use)
    config: Option<PathBuf>,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    ServerConfig::load(args.config.as_deref()).await?;

    // Initialize dependencies in order:
    // 1. Repository
    // 2. AppState (UseCases)
    // 3. Server

    // 1. Create Repositories (in-memory directories)
    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let channel_repository = Arc::new(InMemoryChannelRepository::new());

    // 2. Create UseCases
    let state = Arc::new(AppState::new(account_repository, channel_repository));

    // 3. Create and run the server
    Server::new(state).run(&args.host, args.port).await
}
