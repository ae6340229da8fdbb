//! Headless watcher: polls the news endpoint outside a browser and renders
//! every refresh cycle to stdout or a file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::PollerConfig;
use crate::domain::models::{Endpoint, RefreshOutcome, RenderPolicy};
use crate::domain::services::{NewsPoller, OverlapPolicy, Scheduler};
use crate::infrastructure::http::ReqwestNewsSource;
use crate::infrastructure::output::OutputContainer;
use crate::infrastructure::timer::TokioSleeper;
use crate::shared::errors::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "news-pulse")]
#[command(about = "Poll a latest-news endpoint and render each refresh headlessly")]
pub struct Cli {
    /// Log at DEBUG (includes a preview of every received body)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh on a fixed interval until Ctrl-C
    Watch(WatchArgs),
    /// Run a single refresh cycle; exits non-zero if it failed
    Once(PollArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Absolute URL of the news fragment [env: NEWS_PULSE_ENDPOINT]
    #[arg(long)]
    pub endpoint: Option<Endpoint>,

    /// verbatim, sanitized or plain [env: NEWS_PULSE_RENDER]
    #[arg(long)]
    pub render: Option<RenderPolicy>,

    /// Write each fragment to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub poll: PollArgs,

    /// Refresh interval in milliseconds [env: NEWS_PULSE_INTERVAL_MS]
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Lower bound applied to the interval
    #[arg(long)]
    pub min_interval_ms: Option<u64>,

    /// allow (overlapping cycles) or skip (one cycle in flight) [env: NEWS_PULSE_OVERLAP]
    #[arg(long)]
    pub overlap: Option<OverlapPolicy>,
}

impl PollArgs {
    fn apply(&self, config: &mut PollerConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(render) = self.render {
            config.render = render;
        }
    }
}

impl WatchArgs {
    fn apply(&self, config: &mut PollerConfig) {
        self.poll.apply(config);
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(min_interval_ms) = self.min_interval_ms {
            config.min_interval_ms = min_interval_ms;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap;
        }
    }
}

/// Layer CLI flags over the environment-derived config and check it is usable
/// outside a browser (reqwest cannot resolve page-relative URLs).
pub fn resolve_config(
    env: impl Fn(&str) -> Option<String>,
    apply: impl FnOnce(&mut PollerConfig),
) -> crate::shared::errors::Result<PollerConfig> {
    let mut config = PollerConfig::from_env_with(env)?;
    apply(&mut config);
    config.validate()?;

    let endpoint = config.endpoint.as_str();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "endpoint must be an absolute http(s) URL, got {endpoint}"
        )));
    }
    Ok(config)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Install the tracing subscriber on stderr (stdout carries the fragments)
pub fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Watch(args) => watch(args).await,
        Commands::Once(args) => once(args).await,
    }
}

fn build_poller(
    config: &PollerConfig,
    output: Option<PathBuf>,
) -> NewsPoller<ReqwestNewsSource, OutputContainer> {
    NewsPoller::new(
        ReqwestNewsSource::new(),
        OutputContainer::from_path(output),
        config.endpoint.clone(),
    )
    .with_render_policy(config.render)
}

async fn watch(args: WatchArgs) -> anyhow::Result<()> {
    let config = resolve_config(env_var, |c| args.apply(c)).context("Invalid configuration")?;
    let poller = build_poller(&config, args.poll.output.clone());

    let cancel = CancellationToken::new();
    let scheduler = Scheduler::new(config.schedule(), TokioSleeper, cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping");
            cancel.cancel();
        }
    });

    let stats = scheduler
        .run(|| poller.refresh())
        .instrument(crate::log_context!(config.endpoint.as_str()))
        .await;

    tracing::info!(
        fired = stats.fired,
        completed = stats.completed,
        skipped = stats.skipped,
        "Watcher stopped"
    );
    Ok(())
}

async fn once(args: PollArgs) -> anyhow::Result<()> {
    let config = resolve_config(env_var, |c| args.apply(c)).context("Invalid configuration")?;
    let poller = build_poller(&config, args.output.clone());

    match poller.refresh().await {
        RefreshOutcome::Rendered { bytes } => {
            tracing::info!(bytes = bytes, "News fragment rendered");
            Ok(())
        }
        RefreshOutcome::Failed(e) => {
            Err(anyhow::Error::new(e).context(format!("Refresh of {} failed", config.endpoint)))
        }
    }
}
