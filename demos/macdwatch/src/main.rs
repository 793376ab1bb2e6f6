//! One-shot MACD snapshot for an index symbol
//!
//! Fetches intraday bars for the configured instrument, runs the signal
//! pipeline once and prints the snapshot as JSON. Scheduling repeated runs is
//! the caller's business (cron, a shell loop, whatever).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use sig_feed::providers::{ProviderConfig, YahooChartProvider};
use sig_feed::InstrumentId;
use sig_pipeline::{PipelineConfig, SignalEngine, StrategyKind};

#[derive(Parser, Debug)]
#[clap(name = "macdwatch", about = "One-shot MACD crossover snapshot")]
struct Args {
    /// Pipeline config file (YAML); defaults apply when omitted
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Override the instrument symbol
    #[clap(short, long)]
    symbol: Option<String>,

    /// Override the strategy: zero-line or signal-line
    #[clap(long)]
    strategy: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[clap(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            PipelineConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(symbol) = args.symbol {
        config.instrument = InstrumentId::new(symbol);
    }
    if let Some(strategy) = args.strategy.as_deref() {
        config.strategy = match strategy {
            "zero-line" => StrategyKind::ZeroLine,
            "signal-line" => StrategyKind::SignalLine,
            other => anyhow::bail!("unknown strategy {:?}, expected zero-line or signal-line", other),
        };
    }
    config.validate().context("invalid configuration")?;

    let mut provider = YahooChartProvider::new(ProviderConfig::yahoo_default())
        .context("failed to build provider")?;

    if !provider_healthy(&mut provider).await {
        warn!("provider endpoint looks unreachable, trying anyway");
    }

    let mut engine = SignalEngine::new(provider, config);
    let snapshot = engine.run().await.context("pipeline run failed")?;

    info!(
        "{} @ {:.2} trend {} ({} events)",
        engine.config().instrument,
        snapshot.latest.price,
        snapshot.latest.trend,
        snapshot.events.len()
    );

    let rendered = if args.compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{}", rendered);

    Ok(())
}

async fn provider_healthy(provider: &mut YahooChartProvider) -> bool {
    use sig_feed::MarketDataProvider;

    provider.health_check().await.unwrap_or(false)
}
