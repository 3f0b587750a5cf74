//! Thermal zone readings.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Highest thermal zone index looked at.
const MAX_ZONE: u32 = 6;

/// Reader for `/sys/class/thermal/thermal_zone*`.
pub struct ThermalZones {
    root: PathBuf,
}

impl ThermalZones {
    /// Creates a reader rooted at a sysfs thermal class directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns one `<name>:<celsius>℃` entry per selected zone.
    ///
    /// `flags` selects zones by digit, e.g. "04" reads zones 0 and 4.
    /// Unreadable zones are skipped.
    pub fn read(&self, flags: &str) -> String {
        (0..=MAX_ZONE)
            .filter(|zone| flags.contains(&zone.to_string()))
            .filter_map(|zone| self.read_zone(zone))
            .collect()
    }

    fn read_zone(&self, zone: u32) -> Option<String> {
        let dir = self.root.join(format!("thermal_zone{}", zone));
        let kind = read_trimmed(&dir.join("type"))?;
        let raw = read_trimmed(&dir.join("temp"))?;
        let millidegrees: i64 = match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!("Invalid temperature {:?} in zone {}: {}", raw, zone, e);
                return None;
            }
        };
        Some(format!(
            "{}:{:.1}℃   ",
            kind.replace("-thermal", ""),
            millidegrees as f64 / 1000.0
        ))
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content.trim().to_string()),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_root(name: &str, zones: &[(u32, &str, &str)]) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "athena-led-thermal-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        for (zone, kind, temp) in zones {
            let dir = root.join(format!("thermal_zone{}", zone));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("type"), kind).unwrap();
            fs::write(dir.join("temp"), temp).unwrap();
        }
        root
    }

    #[test]
    fn test_read_selected_zones() {
        let root = fake_root(
            "selected",
            &[
                (0, "cpu-thermal\n", "45123\n"),
                (4, "nss-top-thermal\n", "51000\n"),
            ],
        );
        let zones = ThermalZones::new(&root);
        assert_eq!(zones.read("4"), "nss-top:51.0℃   ");
        assert_eq!(zones.read("04"), "cpu:45.1℃   nss-top:51.0℃   ");
        assert_eq!(zones.read(""), "");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_unreadable_zones_are_skipped() {
        let root = fake_root("skipped", &[(1, "wifi\n", "bogus\n")]);
        let zones = ThermalZones::new(&root);
        // Zone 1 has a bad value, zone 2 does not exist
        assert_eq!(zones.read("12"), "");
        fs::remove_dir_all(root).unwrap();
    }
}
