//! GPIO access through the legacy sysfs interface.

use super::{Gpio, Level};
use crate::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default mount point of the sysfs GPIO class.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Sysfs GPIO backend.
///
/// Value files are opened once per pin and kept open, since a single frame
/// toggles the clock line a few hundred times.
pub struct SysfsGpio {
    root: PathBuf,
    handles: HashMap<u32, File>,
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SysfsGpio {
    /// Creates a backend rooted at `/sys/class/gpio`.
    pub fn new() -> Self {
        Self::with_root(DEFAULT_SYSFS_ROOT)
    }

    /// Creates a backend rooted at a custom directory.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            handles: HashMap::new(),
        }
    }

    /// Returns the sysfs root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pin_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn handle(&mut self, pin: u32) -> Result<&mut File> {
        let path = self.pin_dir(pin).join("value");
        match self.handles.entry(pin) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let file = OpenOptions::new()
                    .write(true)
                    .open(&path)
                    .map_err(|source| Error::Write { pin, source })?;
                debug!("Opened {}", path.display());
                Ok(entry.insert(file))
            }
        }
    }
}

impl Gpio for SysfsGpio {
    fn export(&mut self, pin: u32) -> Result<()> {
        if self.pin_dir(pin).exists() {
            debug!("GPIO {} already exported", pin);
            return Ok(());
        }
        std::fs::write(self.root.join("export"), pin.to_string())
            .map_err(|source| Error::Export { pin, source })?;
        info!("Exported GPIO {}", pin);
        Ok(())
    }

    fn set_direction_out(&mut self, pin: u32) -> Result<()> {
        let path = self.pin_dir(pin).join("direction");
        let mut file = OpenOptions::new()
            .write(true)
            .open(&path)
            .map_err(|source| Error::Direction { pin, source })?;
        file.write_all(b"out\n")
            .map_err(|source| Error::Direction { pin, source })?;
        debug!("GPIO {} set to output", pin);
        Ok(())
    }

    fn set_level(&mut self, pin: u32, level: Level) -> Result<()> {
        let byte: &[u8] = if level.is_high() { b"1" } else { b"0" };
        self.handle(pin)?
            .write_all(byte)
            .map_err(|source| Error::Write { pin, source })
    }

    fn release(&mut self, pin: u32) -> Result<()> {
        self.handles.remove(&pin);
        if !self.pin_dir(pin).exists() {
            return Ok(());
        }
        std::fs::write(self.root.join("unexport"), pin.to_string())
            .map_err(|source| Error::Release { pin, source })?;
        info!("Released GPIO {}", pin);
        Ok(())
    }

    fn release_handles(&mut self) {
        debug!("Closing {} cached GPIO handles", self.handles.len());
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Builds a throwaway sysfs-like tree with the given pins pre-exported.
    fn fake_root(name: &str, pins: &[u32]) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "athena-led-sysfs-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("export"), "").unwrap();
        fs::write(root.join("unexport"), "").unwrap();
        for pin in pins {
            let dir = root.join(format!("gpio{}", pin));
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("direction"), "in\n").unwrap();
            fs::write(dir.join("value"), "").unwrap();
        }
        root
    }

    #[test]
    fn test_export_missing_pin_writes_export_file() {
        let root = fake_root("export", &[]);
        let mut gpio = SysfsGpio::with_root(&root);
        gpio.export(581).unwrap();
        assert_eq!(fs::read_to_string(root.join("export")).unwrap(), "581");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_export_existing_pin_is_noop() {
        let root = fake_root("export-existing", &[581]);
        let mut gpio = SysfsGpio::with_root(&root);
        gpio.export(581).unwrap();
        assert_eq!(fs::read_to_string(root.join("export")).unwrap(), "");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_direction_out() {
        let root = fake_root("direction", &[585]);
        let mut gpio = SysfsGpio::with_root(&root);
        gpio.set_direction_out(585).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("gpio585/direction")).unwrap(),
            "out\n"
        );
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_value_handle_is_cached() {
        let root = fake_root("cached", &[586]);
        let mut gpio = SysfsGpio::with_root(&root);
        gpio.set_level(586, Level::High).unwrap();
        gpio.set_level(586, Level::Low).unwrap();
        gpio.set_level(586, Level::High).unwrap();
        // A regular file keeps appending through the one cached handle
        assert_eq!(
            fs::read_to_string(root.join("gpio586/value")).unwrap(),
            "101"
        );
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_write_to_missing_pin_fails() {
        let root = fake_root("missing", &[]);
        let mut gpio = SysfsGpio::with_root(&root);
        let err = gpio.set_level(999, Level::High).unwrap_err();
        assert!(matches!(err, Error::Write { pin: 999, .. }));
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_release() {
        let root = fake_root("release", &[582]);
        let mut gpio = SysfsGpio::with_root(&root);
        gpio.set_level(582, Level::High).unwrap();
        gpio.release(582).unwrap();
        assert_eq!(fs::read_to_string(root.join("unexport")).unwrap(), "582");
        assert!(gpio.handles.is_empty());

        // Not exported: nothing to do
        gpio.release(600).unwrap();
        assert_eq!(fs::read_to_string(root.join("unexport")).unwrap(), "582");
        fs::remove_dir_all(root).unwrap();
    }

    // Hardware tests are skipped by default
    #[test]
    #[ignore]
    fn test_real_sysfs_root_exists() {
        let gpio = SysfsGpio::new();
        assert!(gpio.root().exists());
    }
}
