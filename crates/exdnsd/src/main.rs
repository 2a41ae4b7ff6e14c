// # exdnsd - external-dns webhook daemon for Porkbun
//
// This is a thin integration layer only:
// - No zone matching, translation or ordering here (see exdns-core)
// - No Porkbun API knowledge here (see exdns-provider-porkbun)
// - Configuration is via command-line flags or environment variables
//
// The exdnsd daemon is responsible for:
// 1. Reading configuration from flags and environment variables
// 2. Initializing logging and the runtime
// 3. Building the Porkbun provider
// 4. Serving the webhook until SIGTERM or SIGINT
//
// ## Configuration
//
// Every setting is a flag; the environment variable is used when the flag
// is absent.
//
// ### Provider
// - `--domain-filter` / `PORKBUN_DOMAIN_FILTER`: Zone the webhook may manage.
//   Repeat the flag or comma-separate values (required)
// - `--porkbun-api-key` / `PORKBUN_API_KEY`: Porkbun API key (required)
// - `--porkbun-api-secret` / `PORKBUN_SECRET_KEY`: Porkbun secret API key (required)
//
// ### Server
// - `--listen-address` / `PORKBUN_LISTEN_ADDRESS`: Address to listen on
//   (default `:8888`, all interfaces)
//
// ### Logging
// - `--log-level` / `LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `--log-method` / `LOG_METHOD`: console or json (default console)
//
// ## Example
//
// ```bash
// export PORKBUN_API_KEY=pk1_...
// export PORKBUN_SECRET_KEY=sk1_...
//
// exdnsd --domain-filter example.com --domain-filter example.org
// ```

mod server;

use anyhow::{Context, Result};
use clap::Parser;
use exdns_core::traits::{Provider, ProviderFactory};
use exdns_core::{ProviderConfig, WebhookConfig};
use exdns_provider_porkbun::PorkbunFactory;
use std::future::Future;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Default listen address (all interfaces)
const DEFAULT_LISTEN_ADDRESS: &str = ":8888";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum WebhookExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<WebhookExitCode> for ExitCode {
    fn from(code: WebhookExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Parser)]
#[command(name = "exdnsd", version)]
#[command(about = "external-dns webhook provider for Porkbun", long_about = None)]
struct Config {
    /// Zone the webhook may manage; repeat or comma-separate for several
    #[arg(long = "domain-filter", env = "PORKBUN_DOMAIN_FILTER", value_delimiter = ',')]
    domain_filter: Vec<String>,

    /// Porkbun API key
    #[arg(
        long = "porkbun-api-key",
        env = "PORKBUN_API_KEY",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true
    )]
    api_key: String,

    /// Porkbun secret API key
    #[arg(
        long = "porkbun-api-secret",
        env = "PORKBUN_SECRET_KEY",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true
    )]
    secret_key: String,

    /// Address to listen on; `:port` binds all interfaces
    #[arg(
        long = "listen-address",
        env = "PORKBUN_LISTEN_ADDRESS",
        default_value = DEFAULT_LISTEN_ADDRESS
    )]
    listen_address: String,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log method: console or json
    #[arg(long = "log-method", env = "LOG_METHOD", default_value = "console")]
    log_method: String,
}

impl Config {
    /// Configured zones, trimmed, with blank entries dropped
    fn zones(&self) -> Vec<String> {
        self.domain_filter
            .iter()
            .flat_map(|zone| zone.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    /// Validate the configuration
    ///
    /// Checks required settings first, then value formats.
    fn validate(&self) -> Result<()> {
        if self.zones().is_empty() {
            anyhow::bail!(
                "--domain-filter (PORKBUN_DOMAIN_FILTER) must contain at least one zone. \
                Set it via: export PORKBUN_DOMAIN_FILTER=example.com,example.org"
            );
        }

        if self.api_key.is_empty() {
            anyhow::bail!(
                "--porkbun-api-key (PORKBUN_API_KEY) is required. \
                Set it via: export PORKBUN_API_KEY=pk1_..."
            );
        }

        if self.secret_key.is_empty() {
            anyhow::bail!(
                "--porkbun-api-secret (PORKBUN_SECRET_KEY) is required. \
                Set it via: export PORKBUN_SECRET_KEY=sk1_..."
            );
        }

        self.socket_addr()?;

        // Validate log level
        parse_log_level(&self.log_level)?;

        // Validate log method
        match self.log_method.to_lowercase().as_str() {
            "console" | "json" => {}
            _ => anyhow::bail!(
                "LOG_METHOD '{}' is not valid. Valid methods: console, json",
                self.log_method
            ),
        }

        Ok(())
    }

    /// Resolve the listen address; a bare `:port` binds all interfaces
    fn socket_addr(&self) -> Result<SocketAddr> {
        let address = if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        };

        address.parse().with_context(|| {
            format!(
                "PORKBUN_LISTEN_ADDRESS '{}' is not a valid address. \
                Expected host:port or :port",
                self.listen_address
            )
        })
    }

    /// Library configuration for the provider factory
    fn webhook_config(&self) -> WebhookConfig {
        WebhookConfig::new(
            self.zones(),
            ProviderConfig::Porkbun {
                api_key: self.api_key.clone(),
                secret_key: self.secret_key.clone(),
            },
        )
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

/// Mask a secret for logging, keeping only its length
fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn init_tracing(config: &Config) -> Result<()> {
    let level = parse_log_level(&config.log_level)?;
    let builder = FmtSubscriber::builder().with_max_level(level);

    if config.log_method.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn main() -> ExitCode {
    // Load configuration from flags and environment
    let config = match Config::try_parse() {
        Ok(cfg) => cfg,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not errors
            return if e.use_stderr() {
                WebhookExitCode::ConfigError.into()
            } else {
                WebhookExitCode::CleanShutdown.into()
            };
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return WebhookExitCode::ConfigError.into();
    }

    // Initialize tracing
    if let Err(e) = init_tracing(&config) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return WebhookExitCode::ConfigError.into();
    }

    info!("Starting exdnsd webhook");
    info!(
        "Configuration loaded: zones={:?}, api_key={}, secret_key={}",
        config.zones(),
        mask(&config.api_key),
        mask(&config.secret_key)
    );

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{:#}", e);
            return WebhookExitCode::ConfigError.into();
        }
    };

    let provider: Arc<dyn Provider> =
        match PorkbunFactory::new().create(&config.webhook_config()) {
            Ok(provider) => Arc::from(provider),
            Err(e) => {
                error!("Failed to create provider: {}", e);
                return WebhookExitCode::ConfigError.into();
            }
        };

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return WebhookExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_server(addr, provider).await {
            error!("Webhook error: {:#}", e);
            WebhookExitCode::RuntimeError
        } else {
            WebhookExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Serve the webhook until a shutdown signal arrives
async fn run_server(addr: SocketAddr, provider: Arc<dyn Provider>) -> Result<()> {
    let shutdown = shutdown_signal()?;
    let app = server::router(provider);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Webhook listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down webhook");
    Ok(())
}

/// Resolve once SIGTERM or SIGINT is received
///
/// Handlers are installed before the server starts so that a setup failure
/// is reported instead of stopping the server immediately.
#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(async move {
        let received = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        info!("Received shutdown signal: {}", received);
    })
}

/// Resolve once CTRL-C is received
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ()>> {
    Ok(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal: SIGINT"),
            Err(e) => error!("Failed to wait for CTRL-C: {}", e),
        }
    })
}
