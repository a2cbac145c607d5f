//! Binary entry point for the calculator widget

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calcpad::config::WindowConfig;

/// On-screen calculator widget
#[derive(Debug, Parser)]
#[command(name = "calcpad", version, about)]
struct Cli {
    /// Window client width in pixels
    #[arg(long, default_value_t = WindowConfig::default().width)]
    width: u32,

    /// Window client height in pixels
    #[arg(long, default_value_t = WindowConfig::default().height)]
    height: u32,

    /// UI scale multiplier on top of the monitor DPI scale
    #[arg(long, default_value_t = WindowConfig::default().scale)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = WindowConfig {
        width: cli.width,
        height: cli.height,
        scale: cli.scale,
    };
    config.validate().context("invalid window configuration")?;

    run(&config)
}

#[cfg(windows)]
fn run(config: &WindowConfig) -> anyhow::Result<()> {
    calcpad::platform::run(config).context("widget window failed")
}

#[cfg(not(windows))]
fn run(_config: &WindowConfig) -> anyhow::Result<()> {
    anyhow::bail!("no windowing backend is available on this platform; calcpad requires Windows")
}
