//! A single display chip.

use super::protocol::{power_command, transmit, Command};
use crate::gpio::Gpio;
use crate::pins::UnitPins;
use crate::Result;
use tracing::debug;

/// One of the two chips making up the panel.
///
/// A unit only knows its pins; the chip itself holds whatever was last
/// written. The [`Gpio`] backend is lent in for each operation so both
/// units can share the clock and data handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnit {
    pins: UnitPins,
}

impl DisplayUnit {
    /// Creates a unit driven by `pins`.
    pub fn new(pins: UnitPins) -> Self {
        Self { pins }
    }

    /// Returns the unit's pins.
    pub fn pins(&self) -> &UnitPins {
        &self.pins
    }

    /// Exports the strobe, clock and data pins and makes them outputs.
    pub fn init<G: Gpio + ?Sized>(&self, gpio: &mut G) -> Result<()> {
        for pin in [self.pins.strobe, self.pins.clock, self.pins.data] {
            gpio.export(pin)?;
            gpio.set_direction_out(pin)?;
        }
        debug!("Unit on strobe {} configured", self.pins.strobe);
        Ok(())
    }

    /// Releases the clock, data and strobe pins, stopping at the first failure.
    pub fn release<G: Gpio + ?Sized>(&self, gpio: &mut G) -> Result<()> {
        for pin in [self.pins.clock, self.pins.data, self.pins.strobe] {
            gpio.release(pin)?;
        }
        Ok(())
    }

    /// Sends the display mode command.
    pub fn set_display_mode<G: Gpio + ?Sized>(&self, gpio: &mut G) -> Result<()> {
        transmit(gpio, &self.pins, Command::DisplayMode as u8, &[])
    }

    /// Selects auto-increment writes to the display registers.
    pub fn set_data_mode<G: Gpio + ?Sized>(&self, gpio: &mut G) -> Result<()> {
        transmit(gpio, &self.pins, Command::DataMode as u8, &[])
    }

    /// Switches the display on at `brightness` (0-7), or off.
    pub fn set_power<G: Gpio + ?Sized>(&self, gpio: &mut G, on: bool, brightness: u8) -> Result<()> {
        transmit(gpio, &self.pins, power_command(on, brightness), &[])
    }

    /// Writes up to 14 column bytes starting at the first column.
    pub fn write_columns<G: Gpio + ?Sized>(&self, gpio: &mut G, columns: &[u8]) -> Result<()> {
        transmit(gpio, &self.pins, Command::Address as u8, columns)
    }
}
