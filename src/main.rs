//! dme-ddns - dynamic DNS client for DNS Made Easy
//!
//! Architecture:
//! - Public IP from an HTTP echo service, compared against a cached copy on disk
//! - DDNS update only when the address changed; cache rewritten atomically after
//! - Single check, or a fixed interval until SIGINT/SIGTERM
//! - Uses reqwest for HTTP (rustls)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod constants;
mod daemon;
mod dns_provider;
mod dnsmadeeasy;
mod error;
mod resolver;
mod state;
mod sync;

use config::{CliOverrides, Config};
use constants::USER_AGENT;
use daemon::{Daemon, ShutdownLatch};
use dnsmadeeasy::DnsMadeEasyClient;
use resolver::PublicIpResolver;
use sync::Reconciler;

//==============================================================================
// Main
//==============================================================================

#[derive(Debug, Parser)]
#[command(name = "dme-ddns", version, about)]
struct Args {
    /// TOML config file containing username, password, record-id and current-ip-file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interval at which to check for IP address changes (e.g. 30s, 1.5m, 1h).
    /// If not given one check (and possibly an update) is performed, then it exits.
    #[arg(long)]
    interval: Option<String>,

    /// Username for updating the DNS record
    #[arg(long)]
    username: Option<String>,

    /// Password for updating the DNS record
    #[arg(long)]
    password: Option<String>,

    /// ID number of the DDNS record
    #[arg(long)]
    record_id: Option<String>,

    /// File containing the current public IP address; created if it does not exist
    #[arg(long)]
    current_ip_file: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Allow insecure TLS connections
    #[arg(long)]
    insecure: bool,

    /// Write the current public IP to the cache file without updating the record.
    /// Used to create the initial cache file. Runs a single check.
    #[arg(short, long, conflicts_with = "force")]
    dont_update: bool,

    /// Update the record even if the cached IP matches. Runs a single check.
    #[arg(long)]
    force: bool,

    /// Enable verbose output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            interval: self.interval.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            record_id: self.record_id.clone(),
            current_ip_file: self.current_ip_file.clone(),
            timeout: self.timeout,
            verbose: self.verbose,
            insecure: self.insecure,
            dont_update: self.dont_update,
            force: self.force,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.clone(), &args.overrides())
        .context("Config load failed")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("Config {:?}", config);

    let http = reqwest::Client::builder()
        .connect_timeout(config.timeout)
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(config.insecure)
        .build()
        .context("HTTP client failed")?;

    let resolver = PublicIpResolver::new(http.clone(), config.ip_url.as_str());
    let dme = DnsMadeEasyClient::new(
        http,
        config.update_url.as_str(),
        &config.username,
        &config.password,
    );
    let reconciler = Reconciler::new(
        Arc::new(resolver),
        Arc::new(dme),
        config.record_id.as_str(),
        config.current_ip_file.as_path(),
    )
    .with_mode(config.sync_mode());

    // Single-shot runs keep the default signal disposition
    let shutdown = if config.interval.is_zero() {
        ShutdownLatch::channel().1
    } else {
        daemon::spawn_shutdown_listener()?
    };

    Daemon::new(config.interval, reconciler).run(shutdown).await?;
    Ok(())
}
