//! lexbridge server entry point.
//!
//! Binary name: `lexbridge`
//!
//! Parses CLI arguments, initializes logging, resolves configuration and
//! AWS clients once, then serves the HTTP API until Ctrl+C or SIGTERM.

use clap::{Parser, Subcommand};

use lexbridge_api::http::router::build_router;
use lexbridge_api::state::ConcreteAppState;
use lexbridge_infra::config::BridgeConfig;
use lexbridge_observe::tracing_setup::{LogOptions, default_directive, init_tracing, shutdown_tracing};

/// Chat bridge between HTTP clients, a Lex V2 bot and a DynamoDB history table.
#[derive(Parser)]
#[command(name = "lexbridge", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    otel: bool,

    /// Suppress all logs except errors.
    #[arg(long, global = true)]
    quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind.
        #[arg(long, env = "LEXBRIDGE_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, env = "LEXBRIDGE_PORT", default_value_t = 3000)]
        port: u16,
    },

    /// Resolve configuration from the environment and print it.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&LogOptions {
        json: cli.json_logs,
        otel: cli.otel,
        default_directive: default_directive(cli.verbose, cli.quiet).to_string(),
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli.command).await;
    shutdown_tracing();
    result
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port } => {
            let state = ConcreteAppState::init()?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(addr = %addr, "lexbridge listening");

            axum::serve(listener, build_router(state))
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }

        Commands::CheckConfig => {
            let config = BridgeConfig::from_env()?;
            let summary = serde_json::json!({
                "botId": config.bot_id,
                "botAliasId": config.bot_alias_id,
                "localeId": config.locale_id,
                "tableName": config.table_name,
                "region": config.region,
                "lexEndpoint": config.lex_endpoint.as_ref().map(|e| e.host().to_string()),
                "dynamodbEndpoint": config.dynamodb_endpoint.as_ref().map(|e| e.host().to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
