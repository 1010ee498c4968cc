//! Auth Control API server
//!
//! ```sh
//! # Serve with ~/.config/auth-control/config.toml (or $AUTH_CONTROL_CONFIG)
//! auth-control serve
//!
//! # Seed dictionaries and demo accounts, then exit
//! auth-control seed
//! auth-control seed --no-examples
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use auth_control::infrastructure::database::seeds::run_seeds;
use auth_control::infrastructure::database::{create_schema, AccountRepository};
use auth_control::shared::{listen_for_shutdown_signals, ShutdownSignal};
use auth_control::{create_api_router, default_config_path, init_database, ApiState, AppConfig};

/// Authentication and user management API.
#[derive(Parser, Debug)]
#[command(name = "auth-control", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Create tables and seed roles, languages and demo accounts
    Seed {
        /// Skip the demo accounts
        #[arg(long)]
        no_examples: bool,
    },
}

fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

async fn open_database(config: &AppConfig) -> Result<DatabaseConnection, Box<dyn std::error::Error>> {
    let db = match init_database(&config.database.to_database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    create_schema(&db).await?;
    Ok(db)
}

async fn seed(config: &AppConfig, include_examples: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_database(config).await?;
    run_seeds(&db, include_examples, config.security.bcrypt_cost).await?;
    db.close().await?;
    Ok(())
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let jwt_config = config.jwt_config();
    if let Err(e) = jwt_config.codec() {
        error!("Refusing to start: {}", e);
        return Err(e.into());
    }

    let db = open_database(&config).await?;
    if config.seed.on_startup {
        run_seeds(&db, config.seed.include_examples, config.security.bcrypt_cost).await?;
    }

    let accounts = Arc::new(AccountRepository::new(db.clone()));
    let router = create_api_router(ApiState::new(accounts, jwt_config), &config.cors);

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("REST API server listening on http://{}", address);
    info!("OpenAPI document at http://{}/api-docs/openapi.json", address);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }

    result?;
    info!("Auth Control API shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = AppConfig::load(&config_path)?;
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Seed { no_examples } => {
            seed(&config, config.seed.include_examples && !no_examples).await
        }
    }
}
