//! GPIO pin assignments.
//!
//! Both chips share the clock and data lines; each has its own strobe.
//! The pin numbers depend on which firmware build is running, which is
//! read from `/etc/openwrt_release`.

use std::path::Path;
use tracing::{debug, warn};

/// Default location of the OpenWrt release file.
pub const DEFAULT_RELEASE_FILE: &str = "/etc/openwrt_release";

/// Distribution assumed when the release file does not name one.
const DEFAULT_DISTRIBUTION: &str = "LiBwrt";

/// Pins of a single chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPins {
    pub strobe: u32,
    pub clock: u32,
    pub data: u32,
}

/// Pins of the whole panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPins {
    pub strobe_left: u32,
    pub strobe_right: u32,
    pub clock: u32,
    pub data: u32,
}

impl Default for PanelPins {
    fn default() -> Self {
        Self {
            strobe_left: 581,
            strobe_right: 582,
            clock: 585,
            data: 586,
        }
    }
}

impl PanelPins {
    /// Returns the pin set used by a distribution ID.
    pub fn for_distribution(id: &str) -> Self {
        match id {
            "QWRT" => Self {
                strobe_left: 501,
                strobe_right: 502,
                clock: 505,
                data: 506,
            },
            _ => Self::default(),
        }
    }

    /// Picks the pin set from an OpenWrt release file.
    ///
    /// An unreadable file falls back to the default pin set.
    pub fn from_release_file<P: AsRef<Path>>(path: P) -> Self {
        let id = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => distribution_id(&content),
            Err(e) => {
                warn!(
                    "Failed to read {}: {}. Using default pins.",
                    path.as_ref().display(),
                    e
                );
                DEFAULT_DISTRIBUTION.to_string()
            }
        };
        debug!("Distribution: {}", id);
        Self::for_distribution(&id)
    }

    /// Pins of the chip driving the left columns.
    pub fn left(&self) -> UnitPins {
        UnitPins {
            strobe: self.strobe_left,
            clock: self.clock,
            data: self.data,
        }
    }

    /// Pins of the chip driving the right columns and the status byte.
    pub fn right(&self) -> UnitPins {
        UnitPins {
            strobe: self.strobe_right,
            clock: self.clock,
            data: self.data,
        }
    }
}

/// Extracts `DISTRIB_ID` from release file contents. The last occurrence wins.
fn distribution_id(content: &str) -> String {
    let mut id = DEFAULT_DISTRIBUTION.to_string();
    for line in content.lines() {
        let Some((_, value)) = line.split_once("DISTRIB_ID=") else {
            continue;
        };
        let value = if value.contains('\'') {
            value.split('\'').nth(1).unwrap_or_default()
        } else {
            value
        };
        id = value.trim().to_string();
    }
    id
}
