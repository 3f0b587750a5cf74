//! Configuration management.

use anyhow::{Context, Result};
use athena_led_hw::{PanelPins, Status};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lit status icons: any of "time medal upload download"
    #[serde(default)]
    pub status: String,

    /// Seconds each option stays on screen
    #[serde(default = "default_seconds")]
    pub seconds: u64,

    /// Brightness (0-7)
    #[serde(default = "default_light_level")]
    pub light_level: u8,

    /// Space-separated display options, shown in order
    #[serde(default = "default_options")]
    pub options: String,

    /// Text for the "string" option
    #[serde(default = "default_value")]
    pub value: String,

    /// URL for the "getByUrl" option
    #[serde(default = "default_url")]
    pub url: String,

    /// Thermal zone digits (0-6) for the "temp" option
    #[serde(default = "default_temp_flag")]
    pub temp_flag: String,

    /// Explicit pins; detected from the release file when absent
    #[serde(default)]
    pub pins: Option<PinsConfig>,

    /// Host file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Panel pin numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PinsConfig {
    pub strobe_left: u32,
    pub strobe_right: u32,
    pub clock: u32,
    pub data: u32,
}

impl From<PinsConfig> for PanelPins {
    fn from(pins: PinsConfig) -> Self {
        PanelPins {
            strobe_left: pins.strobe_left,
            strobe_right: pins.strobe_right,
            clock: pins.clock,
            data: pins.data,
        }
    }
}

/// Host file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// OpenWrt release file, used to pick the pin set
    #[serde(default = "default_release_file")]
    pub release_file: PathBuf,

    /// UCI system config, used to find the time zone
    #[serde(default = "default_system_config")]
    pub system_config: PathBuf,

    /// Sysfs GPIO class directory
    #[serde(default = "default_gpio_root")]
    pub gpio_root: PathBuf,

    /// Sysfs thermal class directory
    #[serde(default = "default_thermal_root")]
    pub thermal_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            release_file: default_release_file(),
            system_config: default_system_config(),
            gpio_root: default_gpio_root(),
            thermal_root: default_thermal_root(),
        }
    }
}

// Default value functions
fn default_seconds() -> u64 {
    5
}

fn default_light_level() -> u8 {
    5
}

fn default_options() -> String {
    "date timeBlink".to_string()
}

fn default_value() -> String {
    "abcdefghijklmnopqrstuvwxyz0123456789+-*/=.:：℃".to_string()
}

fn default_url() -> String {
    "https://www.baidu.com/".to_string()
}

fn default_temp_flag() -> String {
    "4".to_string()
}

fn default_release_file() -> PathBuf {
    PathBuf::from(athena_led_hw::pins::DEFAULT_RELEASE_FILE)
}

fn default_system_config() -> PathBuf {
    PathBuf::from("/etc/config/system")
}

fn default_gpio_root() -> PathBuf {
    PathBuf::from(athena_led_hw::gpio::DEFAULT_SYSFS_ROOT)
}

fn default_thermal_root() -> PathBuf {
    PathBuf::from("/sys/class/thermal")
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Returns the status icons to light.
    pub fn status(&self) -> Status {
        Status::from_words(&self.status)
    }

    /// Returns the configured pins, or the set matching the running firmware.
    pub fn panel_pins(&self) -> PanelPins {
        match self.pins {
            Some(pins) => pins.into(),
            None => PanelPins::from_release_file(&self.paths.release_file),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status: String::new(),
            seconds: default_seconds(),
            light_level: default_light_level(),
            options: default_options(),
            value: default_value(),
            url: default_url(),
            temp_flag: default_temp_flag(),
            pins: None,
            paths: PathsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.seconds, 5);
        assert_eq!(config.light_level, 5);
        assert_eq!(config.options, "date timeBlink");
        assert_eq!(config.temp_flag, "4");
        assert!(config.pins.is_none());
        assert_eq!(config.paths.gpio_root, PathBuf::from("/sys/class/gpio"));
    }

    #[test]
    fn test_parse_full() {
        let config: Config = toml::from_str(
            r#"
            status = "time download"
            seconds = 10
            light_level = 2
            options = "time temp"

            [pins]
            strobe_left = 1
            strobe_right = 2
            clock = 3
            data = 4

            [paths]
            thermal_root = "/tmp/thermal"
            "#,
        )
        .unwrap();
        assert_eq!(config.status(), Status::TIME | Status::DOWNLOAD);
        assert_eq!(config.seconds, 10);
        assert_eq!(config.light_level, 2);

        let pins = config.panel_pins();
        assert_eq!(pins.strobe_left, 1);
        assert_eq!(pins.data, 4);
        assert_eq!(config.paths.thermal_root, PathBuf::from("/tmp/thermal"));
        assert_eq!(
            config.paths.system_config,
            PathBuf::from("/etc/config/system")
        );
    }
}
