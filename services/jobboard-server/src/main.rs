//! Jobboard API Server
//!
//! REST API server for the job board: signup and login, job postings and
//! applications, all gated by bearer-token identity and role checks.
//!
//! # Usage
//!
//! ```bash
//! # Start with a signing secret from the environment
//! JWT_SECRET=... jobboard-server
//!
//! # Start with custom config
//! jobboard-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! JOBBOARD__SERVER__PORT=9000 jobboard-server
//!
//! # Local development with a generated throwaway secret
//! jobboard-server --dev-mode
//! ```

mod config;

use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio::sync::oneshot;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobboard_api::{create_router, ApiConfig, AppState};
use jobboard_auth::{AuthConfig, AuthService};
use jobboard_db::Database;

use crate::config::ServerConfig;

/// Signing secret used with `--dev-mode` when none is configured
const DEV_JWT_SECRET: &str = "jobboard-development-secret-do-not-deploy";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Jobboard API Server
#[derive(Parser, Debug)]
#[command(name = "jobboard-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "JOBBOARD_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "JOBBOARD_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "JOBBOARD_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "JOBBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "JOBBOARD_LOG_FORMAT")]
    log_format: Option<String>,

    /// JWT secret key
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: Option<String>,

    /// Enable development mode (relaxed secret requirements)
    #[arg(long, env = "JOBBOARD_DEV_MODE")]
    dev_mode: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(level) = args.log_level {
        server_config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        server_config.logging.format = format;
    }
    if let Some(jwt_secret) = args.jwt_secret {
        server_config.auth.jwt_secret = Some(jwt_secret);
    }

    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        dev_mode = args.dev_mode,
        "Starting Jobboard API Server"
    );

    let auth_config = build_auth_config(&server_config.auth, args.dev_mode)?;

    let db = Arc::new(Database::new());
    let auth = Arc::new(AuthService::new(Arc::new(db.user_repo()), auth_config)?);
    tracing::info!(
        token_lifetime_secs = auth.tokens.lifetime().num_seconds(),
        "Authentication service initialized"
    );

    let state = Arc::new(AppState::new(db, auth));

    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_tracing: server_config.api.enable_tracing,
    };

    let app = create_router(state, api_config);

    let addr = server_config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = stop_rx.await;
        })
        .into_future();

    serve_until_shutdown(
        server,
        stop_tx,
        shutdown_signal(),
        server_config.server.shutdown_timeout(),
    )
    .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()?,
        _ => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
    }

    Ok(())
}

/// Merge server settings over the auth environment and validate the result
fn build_auth_config(settings: &config::AuthSettings, dev_mode: bool) -> anyhow::Result<AuthConfig> {
    let mut auth_config = AuthConfig::from_env()?;

    if let Some(secret) = &settings.jwt_secret {
        auth_config.jwt.secret = secret.clone();
    }
    if let Some(secs) = settings.token_lifetime_secs {
        auth_config.jwt.token_lifetime = Duration::from_secs(secs);
    }
    if let Some(pepper) = &settings.password_pepper {
        auth_config.password.pepper = Some(pepper.clone());
    }

    if dev_mode && auth_config.jwt.secret.is_empty() {
        tracing::warn!("No JWT secret configured; using the development secret");
        auth_config.jwt.secret = DEV_JWT_SECRET.to_string();
    }

    if let Err(errors) = auth_config.validate() {
        if !dev_mode {
            anyhow::bail!("Invalid authentication configuration: {}", errors.join("; "));
        }
        for error in errors {
            tracing::warn!(%error, "Ignoring configuration problem in development mode");
        }
    }

    Ok(auth_config)
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Drive `server` until `signal` fires, then stop accepting connections and
/// give in-flight requests at most `grace` to finish.
///
/// `stop` is the trigger wired into the server's graceful shutdown.
async fn serve_until_shutdown<S>(
    server: S,
    stop: oneshot::Sender<()>,
    signal: impl Future<Output = ()>,
    grace: Duration,
) -> anyhow::Result<()>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        _ = signal => {}
    }

    let _ = stop.send(());
    tracing::info!(
        timeout_secs = grace.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    match tokio::time::timeout(grace, server).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::warn!(
                timeout_secs = grace.as_secs(),
                "Shutdown timeout elapsed, dropping remaining connections"
            );
            Ok(())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["jobboard-server", "--port", "8081", "--dev-mode"]);
        assert_eq!(args.port, Some(8081));
        assert!(args.dev_mode);
        assert!(args.host.is_none());
    }

    #[test]
    fn test_development_config() {
        let config = ServerConfig::development();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
        assert!(config.server.socket_addr().is_ok());
    }

    #[test]
    fn test_settings_override_auth_environment() {
        let settings = config::AuthSettings {
            jwt_secret: Some("s".repeat(40)),
            token_lifetime_secs: Some(120),
            password_pepper: None,
        };
        let auth = build_auth_config(&settings, false).unwrap();
        assert_eq!(auth.jwt.secret.len(), 40);
        assert_eq!(auth.jwt.token_lifetime, Duration::from_secs(120));
    }

    /// A server that finishes `drain` after the stop trigger fires
    fn fake_server(
        stop_rx: oneshot::Receiver<()>,
        drain: Duration,
    ) -> impl Future<Output = std::io::Result<()>> {
        async move {
            let _ = stop_rx.await;
            tokio::time::sleep(drain).await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_accepting_as_soon_as_signalled() {
        let (stop_tx, stop_rx) = oneshot::channel();
        let start = tokio::time::Instant::now();

        serve_until_shutdown(
            fake_server(stop_rx, Duration::from_millis(200)),
            stop_tx,
            std::future::ready(()),
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(1), "waited {:?} before stopping", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_enforces_deadline() {
        let (stop_tx, stop_rx) = oneshot::channel();
        let start = tokio::time::Instant::now();

        serve_until_shutdown(
            fake_server(stop_rx, Duration::from_secs(3600)),
            stop_tx,
            tokio::time::sleep(Duration::from_secs(5)),
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(15));
        assert!(elapsed < Duration::from_secs(16), "drain ran past the deadline: {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_before_signal_is_returned() {
        let (stop_tx, _stop_rx) = oneshot::channel();
        let failing =
            async { Err::<(), _>(std::io::Error::new(std::io::ErrorKind::AddrInUse, "bind")) };

        let result = serve_until_shutdown(
            failing,
            stop_tx,
            std::future::pending(),
            Duration::from_secs(10),
        )
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_short_secret_is_rejected_outside_dev_mode() {
        let settings = config::AuthSettings {
            jwt_secret: Some("short".to_string()),
            ..Default::default()
        };
        assert!(build_auth_config(&settings, false).is_err());
        assert!(build_auth_config(&settings, true).is_ok());
    }
}
