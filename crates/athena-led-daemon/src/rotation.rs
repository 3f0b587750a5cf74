//! Display option rotation.
//!
//! Cycles through the configured options forever, holding each on screen
//! for the configured number of seconds.

use anyhow::{bail, Result};
use athena_led_hw::{Gpio, Screen, Status};
use chrono_tz::Tz;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::sources::{clock, http, ThermalZones};

/// Interval between colon toggles in blinking time mode.
const BLINK_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest pause after a round in which every option was skipped.
const IDLE_DELAY: Duration = Duration::from_secs(1);

/// What to show in one slot of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOption {
    /// Month and day.
    Date,
    /// Hours and minutes.
    Time,
    /// Hours and minutes with a blinking colon.
    TimeBlink,
    /// Thermal zone temperatures.
    Temp,
    /// The configured text.
    String,
    /// Text fetched from the configured URL.
    GetByUrl,
}

impl FromStr for DisplayOption {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "date" => Ok(DisplayOption::Date),
            "time" => Ok(DisplayOption::Time),
            "timeblink" => Ok(DisplayOption::TimeBlink),
            "temp" => Ok(DisplayOption::Temp),
            "string" => Ok(DisplayOption::String),
            "getbyurl" => Ok(DisplayOption::GetByUrl),
            _ => bail!("Invalid display option: {}", s),
        }
    }
}

impl std::fmt::Display for DisplayOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayOption::Date => write!(f, "date"),
            DisplayOption::Time => write!(f, "time"),
            DisplayOption::TimeBlink => write!(f, "timeBlink"),
            DisplayOption::Temp => write!(f, "temp"),
            DisplayOption::String => write!(f, "string"),
            DisplayOption::GetByUrl => write!(f, "getByUrl"),
        }
    }
}

/// Parses a space-separated option list, dropping unknown names.
pub fn parse_options(list: &str) -> Vec<DisplayOption> {
    list.split_whitespace()
        .filter_map(|name| match name.parse() {
            Ok(option) => Some(option),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

/// Rotation state.
pub struct Rotation {
    options: Vec<DisplayOption>,
    hold: Duration,
    status: Status,
    value: String,
    url: String,
    temp_flag: String,
    zone: Tz,
    thermal: ThermalZones,
    client: reqwest::Client,
    colon_hidden: bool,
}

impl Rotation {
    /// Builds the rotation described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let options = parse_options(&config.options);
        if options.is_empty() {
            bail!("No valid display options in {:?}", config.options);
        }
        info!(
            "Rotating {:?} every {}s",
            options.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            config.seconds
        );

        Ok(Self {
            options,
            hold: Duration::from_secs(config.seconds),
            status: config.status(),
            value: config.value.clone(),
            url: config.url.clone(),
            temp_flag: config.temp_flag.clone(),
            zone: clock::zone(&config.paths.system_config),
            thermal: ThermalZones::new(&config.paths.thermal_root),
            client: http::client()?,
            colon_hidden: false,
        })
    }

    /// Runs until the future is dropped.
    ///
    /// Yields to the runtime after every option, so a round of skipped or
    /// zero-second options never starves other tasks.
    pub async fn run<G: Gpio>(&mut self, screen: &mut Screen<G>) {
        loop {
            let mut shown = false;
            for option in self.options.clone() {
                debug!("Showing {}", option);
                shown |= self.show_option(screen, option).await;
                tokio::task::yield_now().await;
            }
            if !shown {
                debug!("Nothing to show this round");
                sleep(self.hold.max(IDLE_DELAY)).await;
            }
        }
    }

    /// Shows one option and holds it. Returns false if it was skipped.
    async fn show_option<G: Gpio>(
        &mut self,
        screen: &mut Screen<G>,
        option: DisplayOption,
    ) -> bool {
        let text = match option {
            DisplayOption::Date => clock::now(self.zone, clock::DATE_FORMAT),
            DisplayOption::Time => clock::now(self.zone, clock::TIME_FORMAT),
            DisplayOption::TimeBlink => return self.blink_time(screen).await,
            DisplayOption::Temp => {
                let text = self.thermal.read(&self.temp_flag);
                if text.is_empty() {
                    return false;
                }
                text
            }
            DisplayOption::String => self.value.clone(),
            DisplayOption::GetByUrl => match http::fetch(&self.client, &self.url).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("{:#}", e);
                    return false;
                }
            },
        };
        self.show(screen, &text).await;
        sleep(self.hold).await;
        true
    }

    /// Shows the time once per second for the hold period, toggling the
    /// colon each time. The toggle state carries over between rounds.
    async fn blink_time<G: Gpio>(&mut self, screen: &mut Screen<G>) -> bool {
        let deadline = Instant::now() + self.hold;
        let mut shown = false;
        while Instant::now() < deadline {
            shown = true;
            let mut text = clock::now(self.zone, clock::TIME_FORMAT);
            if self.colon_hidden {
                text = clock::hide_colon(&text);
            }
            self.colon_hidden = !self.colon_hidden;
            self.show(screen, &text).await;
            sleep(BLINK_INTERVAL).await;
        }
        shown
    }

    async fn show<G: Gpio>(&self, screen: &mut Screen<G>, text: &str) {
        if let Err(e) = screen.render_async(text, self.status).await {
            warn!("Render failed: {}", e);
        }
    }
}
