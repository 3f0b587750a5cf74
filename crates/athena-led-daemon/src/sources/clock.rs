//! Local date and time.
//!
//! Zones are resolved against the bundled tz database, so the host needs
//! no zoneinfo files.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::Path;
use tracing::{info, warn};

/// Zone used when the system config does not set a usable one.
pub const DEFAULT_ZONE: Tz = chrono_tz::Asia::Shanghai;

/// Date layout: month-day.
pub const DATE_FORMAT: &str = "%m-%d";

/// Time layout: 24-hour clock.
pub const TIME_FORMAT: &str = "%H:%M";

/// Reads the zone name from a UCI system config file.
///
/// Looks for `option zonename '<zone>'`; spaces in the name become
/// underscores.
pub fn zone_name<P: AsRef<Path>>(path: P) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => parse_zone_name(&content),
        Err(e) => {
            warn!("Failed to read {}: {}", path.as_ref().display(), e);
            None
        }
    }
}

/// Returns the zone configured in a UCI system config file, falling back
/// to [`DEFAULT_ZONE`].
pub fn zone<P: AsRef<Path>>(path: P) -> Tz {
    let zone = match zone_name(path) {
        Some(name) => match name.parse::<Tz>() {
            Ok(zone) => zone,
            Err(e) => {
                warn!("Unknown time zone {:?}: {}", name, e);
                DEFAULT_ZONE
            }
        },
        None => DEFAULT_ZONE,
    };
    info!("Using time zone {}", zone.name());
    zone
}

fn parse_zone_name(content: &str) -> Option<String> {
    content
        .lines()
        .filter(|line| line.contains("option zonename"))
        .filter_map(|line| line.split('\'').nth(1))
        .map(|zone| zone.trim().replace(' ', "_"))
        .last()
}

/// Formats the current time in `zone`.
pub fn now(zone: Tz, format: &str) -> String {
    at(Utc::now(), zone, format)
}

/// Formats `instant` in `zone`.
pub fn at(instant: DateTime<Utc>, zone: Tz, format: &str) -> String {
    instant.with_timezone(&zone).format(format).to_string()
}

/// Replaces the colon with blank columns of the same width.
pub fn hide_colon(time: &str) -> String {
    time.replace(':', "  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn system_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "athena-led-system-{}-{}",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_zone_name() {
        let content = "config system\n\toption hostname 'OpenWrt'\n\toption zonename 'America/New York'\n";
        assert_eq!(
            parse_zone_name(content).as_deref(),
            Some("America/New_York")
        );
        assert_eq!(parse_zone_name("config system\n"), None);
    }

    #[test]
    fn test_zone_from_file() {
        let path = system_file("zone", "config system\n\toption zonename 'America/New York'\n");
        assert_eq!(zone(&path), chrono_tz::America::New_York);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_zone_fallbacks() {
        assert_eq!(zone("/nonexistent/system"), DEFAULT_ZONE);

        let path = system_file("bogus", "config system\n\toption zonename 'Mars/Olympus'\n");
        assert_eq!(zone(&path), DEFAULT_ZONE);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_formats_in_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 20, 30, 0).unwrap();
        assert_eq!(at(instant, DEFAULT_ZONE, TIME_FORMAT), "04:30");
        assert_eq!(at(instant, DEFAULT_ZONE, DATE_FORMAT), "01-02");
        assert_eq!(at(instant, Tz::UTC, TIME_FORMAT), "20:30");
        assert_eq!(at(instant, Tz::UTC, DATE_FORMAT), "01-01");
    }

    #[test]
    fn test_now_shape() {
        let time = now(DEFAULT_ZONE, TIME_FORMAT);
        assert_eq!(time.len(), 5);
        assert_eq!(hide_colon(&time).len(), 6);
    }

    #[test]
    fn test_hidden_colon_keeps_width() {
        let shown = athena_led_hw::text::encode("12:34");
        let hidden = athena_led_hw::text::encode(&hide_colon("12:34"));
        assert_eq!(shown.len(), hidden.len());
    }
}
