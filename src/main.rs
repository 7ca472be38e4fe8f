use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Live property inspector for declarative UI documents.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON5 scenario: `{ uri, source | sourcePath, query }`. Uses a built-in sample when omitted.
    scenario: Option<PathBuf>,

    /// Start with the light theme.
    #[arg(long)]
    light: bool,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let args = Args::parse();
    let scenario = match &args.scenario {
        Some(path) => propsync::Scenario::load_path(path)?,
        None => propsync::Scenario::sample()?,
    };
    tracing::info!(uri = %scenario.uri, "opening scenario");

    propsync::run_gui(scenario, !args.light).map_err(|e| anyhow::anyhow!("gui error: {e}"))
}
