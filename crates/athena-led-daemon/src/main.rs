//! Athena LED Daemon
//!
//! Rotates clock, temperature and text content on the router's LED panel.

mod config;
mod rotation;
mod sources;

use anyhow::{Context, Result};
use athena_led_hw::{Gpio, Screen, SimulatedGpio, SysfsGpio};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use rotation::Rotation;

#[derive(Parser, Debug)]
#[command(name = "athena-ledd")]
#[command(about = "LED panel daemon for the Athena router")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drive an in-memory panel instead of sysfs GPIO
    #[arg(long)]
    dry_run: bool,

    /// Lit status icons: any of "time medal upload download"
    #[arg(long)]
    status: Option<String>,

    /// Seconds each option stays on screen
    #[arg(long)]
    seconds: Option<u64>,

    /// Brightness (0-7)
    #[arg(long, visible_alias = "lightLevel")]
    light_level: Option<u8>,

    /// Display options: date time timeBlink temp string getByUrl
    #[arg(long)]
    option: Option<String>,

    /// Text for the "string" option
    #[arg(long)]
    value: Option<String>,

    /// URL for the "getByUrl" option
    #[arg(long)]
    url: Option<String>,

    /// Thermal zone digits (0-6) for the "temp" option
    #[arg(long, visible_alias = "tempFlag")]
    temp_flag: Option<String>,
}

impl Cli {
    /// Overrides file values with the flags that were given.
    fn apply(&self, config: &mut Config) {
        if let Some(status) = &self.status {
            config.status = status.clone();
        }
        if let Some(seconds) = self.seconds {
            config.seconds = seconds;
        }
        if let Some(light_level) = self.light_level {
            config.light_level = light_level;
        }
        if let Some(options) = &self.option {
            config.options = options.clone();
        }
        if let Some(value) = &self.value {
            config.value = value.clone();
        }
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(temp_flag) = &self.temp_flag {
            config.temp_flag = temp_flag.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path).context("Failed to load configuration")?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };
    cli.apply(&mut config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build runtime")?;
    runtime.block_on(run(config, cli.dry_run))
}

async fn run(config: Config, dry_run: bool) -> Result<()> {
    let mut rotation = Rotation::new(&config)?;

    let pins = config.panel_pins();
    let gpio: Box<dyn Gpio> = if dry_run {
        info!("Dry run: using simulated GPIO");
        Box::new(SimulatedGpio::new())
    } else {
        Box::new(SysfsGpio::with_root(&config.paths.gpio_root))
    };
    let mut screen = Screen::open(gpio, pins).context("Failed to open screen")?;

    if let Err(e) = screen.set_power(true, config.light_level) {
        if let Err(e) = screen.shutdown() {
            warn!("Shutdown error: {}", e);
        }
        return Err(e).context("Failed to power on screen");
    }
    info!("Screen on (brightness {})", config.light_level);

    // Setup Unix signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = rotation.run(&mut screen) => {}
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sighup.recv() => {
            info!("Received SIGHUP, shutting down");
        }
        _ = sigquit.recv() => {
            info!("Received SIGQUIT, shutting down");
        }
    }

    if let Err(e) = screen.shutdown() {
        warn!("Shutdown error: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["athena-ledd"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.seconds, 5);
        assert_eq!(config.light_level, 5);
        assert_eq!(config.options, "date timeBlink");
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "athena-ledd",
            "--status",
            "time medal",
            "--seconds",
            "2",
            "--lightLevel",
            "7",
            "--option",
            "string temp",
            "--value",
            "ok",
            "--temp-flag",
            "04",
            "--dry-run",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.status, "time medal");
        assert_eq!(config.seconds, 2);
        assert_eq!(config.light_level, 7);
        assert_eq!(config.options, "string temp");
        assert_eq!(config.value, "ok");
        assert_eq!(config.temp_flag, "04");
        assert!(cli.dry_run);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dry_run_rejects_empty_rotation() {
        let config = Config {
            options: "nothing".to_string(),
            ..Config::default()
        };
        assert!(run(config, true).await.is_err());
    }
}
