//! In-memory GPIO backend.

use super::{Gpio, Level};
use crate::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// GPIO backend that only tracks pin state.
///
/// Used for headless runs and as the test double for the protocol code.
/// With [`SimulatedGpio::recording`] every level write is appended to a
/// journal that tests decode back into frames.
#[derive(Debug, Default)]
pub struct SimulatedGpio {
    exported: BTreeSet<u32>,
    outputs: BTreeSet<u32>,
    levels: HashMap<u32, Level>,
    journal: Option<Vec<(u32, Level)>>,
    released: Vec<u32>,
    handles_open: bool,
    writes_left: Option<usize>,
    failing_release: Option<u32>,
}

impl SimulatedGpio {
    /// Creates a backend without a journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that journals every level write.
    pub fn recording() -> Self {
        Self {
            journal: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Makes every level write after the next `writes` fail.
    pub fn fail_after(&mut self, writes: usize) {
        self.writes_left = Some(writes);
    }

    /// Makes releasing `pin` fail.
    pub fn fail_release_of(&mut self, pin: u32) {
        self.failing_release = Some(pin);
    }

    /// Returns the journal of level writes, oldest first.
    pub fn journal(&self) -> &[(u32, Level)] {
        self.journal.as_deref().unwrap_or(&[])
    }

    /// Drops everything journaled so far.
    pub fn clear_journal(&mut self) {
        if let Some(journal) = self.journal.as_mut() {
            journal.clear();
        }
    }

    /// Returns the last level written to `pin`.
    pub fn level(&self, pin: u32) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    /// Returns true if `pin` is exported.
    pub fn is_exported(&self, pin: u32) -> bool {
        self.exported.contains(&pin)
    }

    /// Returns true if `pin` is configured as an output.
    pub fn is_output(&self, pin: u32) -> bool {
        self.outputs.contains(&pin)
    }

    /// Returns released pins in release order.
    pub fn released(&self) -> &[u32] {
        &self.released
    }

    /// Returns true while value handles are held open.
    pub fn handles_open(&self) -> bool {
        self.handles_open
    }
}

impl Gpio for SimulatedGpio {
    fn export(&mut self, pin: u32) -> Result<()> {
        self.exported.insert(pin);
        Ok(())
    }

    fn set_direction_out(&mut self, pin: u32) -> Result<()> {
        if !self.exported.contains(&pin) {
            return Err(Error::Direction {
                pin,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "pin not exported"),
            });
        }
        self.outputs.insert(pin);
        Ok(())
    }

    fn set_level(&mut self, pin: u32, level: Level) -> Result<()> {
        if !self.outputs.contains(&pin) {
            return Err(Error::NotOutput(pin));
        }
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(Error::Write {
                    pin,
                    source: std::io::Error::other("simulated write failure"),
                });
            }
            *left -= 1;
        }
        trace!("GPIO {} <- {}", pin, level);
        self.handles_open = true;
        self.levels.insert(pin, level);
        if let Some(journal) = self.journal.as_mut() {
            journal.push((pin, level));
        }
        Ok(())
    }

    fn release(&mut self, pin: u32) -> Result<()> {
        if self.failing_release == Some(pin) {
            return Err(Error::Release {
                pin,
                source: std::io::Error::other("simulated release failure"),
            });
        }
        if self.exported.remove(&pin) {
            self.outputs.remove(&pin);
            self.released.push(pin);
        }
        Ok(())
    }

    fn release_handles(&mut self) {
        self.handles_open = false;
    }
}
