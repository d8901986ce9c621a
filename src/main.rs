//! BCA Expert: service entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Load config
//!   4. Resolve effective log level (CLI `-v` flags > env > config) and init logger
//!   5. Build the completion gateway
//!   6. Spawn Ctrl-C → shutdown signal watcher
//!   7. Serve HTTP until shutdown

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bca_expert::bootstrap::cli;
use bca_expert::error::AppError;
use bca_expert::llm::CompletionGateway;
use bca_expert::server::{self, AppState};
use bca_expert::{config, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let args = cli::parse(std::env::args().skip(1)).map_err(AppError::Config)?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log.level.as_str());
    logger::init(effective_log_level, args.log_level.is_some(), config.log.file.as_deref())?;

    info!(
        bind = %config.server.bind,
        service = %config.server.service_name,
        provider = %config.llm.provider,
        model = %config.llm.model,
        configured_log_level = %config.log.level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let gateway = CompletionGateway::new(&config.llm, config.llm_api_key.clone())
        .map_err(|e| AppError::Config(e.to_string()))?;
    if !gateway.is_configured() {
        warn!("OPENAI_API_KEY or OPENAI_API_BASE not set; chat replies will carry the configuration apology");
    }

    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let state = AppState::new(gateway, &config.server.service_name);
    server::run(&config.server, state, shutdown).await
}
