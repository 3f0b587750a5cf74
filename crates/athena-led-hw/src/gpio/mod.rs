//! Digital line access.
//!
//! The panel is bit-banged, so every protocol operation reduces to a
//! sequence of level writes on individual GPIO pins. [`Gpio`] is the seam
//! between the protocol code and the host: [`SysfsGpio`] drives real pins
//! through `/sys/class/gpio`, [`SimulatedGpio`] keeps everything in memory.

mod simulated;
mod sysfs;

pub use simulated::SimulatedGpio;
pub use sysfs::{SysfsGpio, DEFAULT_SYSFS_ROOT};

use crate::Result;

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns the level of bit `index` of `value`.
    pub fn of_bit(value: u8, index: u32) -> Self {
        Self::from((value >> index) & 0x01 == 0x01)
    }

    /// Returns true for [`Level::High`].
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "0"),
            Level::High => write!(f, "1"),
        }
    }
}

/// Host access to GPIO pins.
///
/// One instance owns every open handle; display units borrow it for the
/// duration of a single transmission.
pub trait Gpio {
    /// Makes `pin` available to userspace. Exporting an already exported
    /// pin succeeds.
    fn export(&mut self, pin: u32) -> Result<()>;

    /// Configures `pin` as an output.
    fn set_direction_out(&mut self, pin: u32) -> Result<()>;

    /// Drives `pin` to `level`.
    fn set_level(&mut self, pin: u32, level: Level) -> Result<()>;

    /// Hands `pin` back to the kernel. Releasing a pin that is not exported
    /// succeeds.
    fn release(&mut self, pin: u32) -> Result<()>;

    /// Closes every cached handle without releasing the pins.
    fn release_handles(&mut self);
}

impl<G: Gpio + ?Sized> Gpio for Box<G> {
    fn export(&mut self, pin: u32) -> Result<()> {
        (**self).export(pin)
    }

    fn set_direction_out(&mut self, pin: u32) -> Result<()> {
        (**self).set_direction_out(pin)
    }

    fn set_level(&mut self, pin: u32, level: Level) -> Result<()> {
        (**self).set_level(pin, level)
    }

    fn release(&mut self, pin: u32) -> Result<()> {
        (**self).release(pin)
    }

    fn release_handles(&mut self) {
        (**self).release_handles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_of_bit() {
        assert_eq!(Level::of_bit(0b0000_0001, 0), Level::High);
        assert_eq!(Level::of_bit(0b0000_0001, 1), Level::Low);
        assert_eq!(Level::of_bit(0b1000_0000, 7), Level::High);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::High.to_string(), "1");
        assert_eq!(Level::Low.to_string(), "0");
    }

    #[test]
    fn test_boxed_gpio_delegates() {
        let mut gpio: Box<dyn Gpio> = Box::new(SimulatedGpio::new());
        gpio.export(7).unwrap();
        gpio.set_direction_out(7).unwrap();
        gpio.set_level(7, Level::High).unwrap();
        gpio.release(7).unwrap();
    }
}
