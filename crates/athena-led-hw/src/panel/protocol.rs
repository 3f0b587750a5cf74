//! Chip protocol definitions and encoding.
//!
//! Frame structure:
//! - Strobe low opens a frame, strobe high latches it
//! - Each bit: clock low, data set, clock high (sampled on the rising edge)
//! - Command byte: 8 bits, LSB first
//! - Up to 14 data bytes: low 5 bits each, LSB first; odd-indexed bytes are
//!   followed by 6 zero bits to step over the chip's unused address slots

use crate::gpio::{Gpio, Level};
use crate::pins::UnitPins;
use crate::Result;
use tracing::debug;

/// Maximum number of data bytes per frame.
pub const MAX_DATA_BYTES: usize = 14;

/// Bits sent per command byte.
pub const COMMAND_BITS: u32 = 8;

/// Bits sent per data byte.
pub const DATA_BITS: u32 = 5;

/// Zero bits following every odd-indexed data byte.
pub const ODD_PADDING_BITS: usize = 6;

/// Display control byte with the display switched off.
pub const POWER_OFF: u8 = 0b1000_0000;

/// Display control byte with the display on, brightness bits clear.
pub const POWER_ON: u8 = 0b1000_1000;

/// Brightness occupies the low three bits of the display control byte.
pub const BRIGHTNESS_MASK: u8 = 0b0000_0111;

/// Chip commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    /// Display mode setting.
    DisplayMode = 0b0000_0011,
    /// Data setting: write to display registers, auto-increment address.
    DataMode = 0b0100_0000,
    /// Address setting: start writing at column 0.
    Address = 0b1100_0000,
}

/// Builds the display control byte.
///
/// Only the low three bits of `brightness` are used. When `on` is false the
/// brightness is ignored.
pub fn power_command(on: bool, brightness: u8) -> u8 {
    if on {
        POWER_ON | (brightness & BRIGHTNESS_MASK)
    } else {
        POWER_OFF
    }
}

/// Returns the bit sequence clocked out for one frame, in wire order.
///
/// Data beyond [`MAX_DATA_BYTES`] is dropped.
pub fn frame_bits(command: u8, data: &[u8]) -> Vec<Level> {
    let data = &data[..data.len().min(MAX_DATA_BYTES)];
    let mut bits = Vec::with_capacity(COMMAND_BITS as usize + data.len() * 11);

    bits.extend((0..COMMAND_BITS).map(|i| Level::of_bit(command, i)));
    for (index, &value) in data.iter().enumerate() {
        bits.extend((0..DATA_BITS).map(|i| Level::of_bit(value, i)));
        if index % 2 == 1 {
            bits.extend(std::iter::repeat(Level::Low).take(ODD_PADDING_BITS));
        }
    }
    bits
}

/// Sends one framed command to the chip selected by `pins.strobe`.
///
/// A failed write aborts the frame; the strobe is left wherever it was.
pub fn transmit<G: Gpio + ?Sized>(
    gpio: &mut G,
    pins: &UnitPins,
    command: u8,
    data: &[u8],
) -> Result<()> {
    if data.len() > MAX_DATA_BYTES {
        debug!(
            "Dropping {} data bytes past the frame limit",
            data.len() - MAX_DATA_BYTES
        );
    }

    gpio.set_level(pins.strobe, Level::Low)?;
    for bit in frame_bits(command, data) {
        gpio.set_level(pins.clock, Level::Low)?;
        gpio.set_level(pins.data, bit)?;
        gpio.set_level(pins.clock, Level::High)?;
    }
    gpio.set_level(pins.strobe, Level::High)
}

/// Frame decoding for tests: replays a simulated journal the way the chip
/// would sample it.
#[cfg(test)]
pub(crate) mod decode {
    use super::*;

    /// A frame as seen by one chip.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DecodedFrame {
        pub command: u8,
        pub data: Vec<u8>,
    }

    impl DecodedFrame {
        fn from_bits(bits: &[Level]) -> Self {
            let byte = |bits: &[Level]| {
                bits.iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, bit)| acc | ((bit.is_high() as u8) << i))
            };
            assert!(bits.len() >= COMMAND_BITS as usize, "truncated command");
            let command = byte(&bits[..COMMAND_BITS as usize]);

            let mut data = Vec::new();
            let mut rest = &bits[COMMAND_BITS as usize..];
            while !rest.is_empty() {
                data.push(byte(&rest[..DATA_BITS as usize]));
                rest = &rest[DATA_BITS as usize..];
                if data.len() % 2 == 0 {
                    let (padding, tail) = rest.split_at(ODD_PADDING_BITS);
                    assert!(padding.iter().all(|b| !b.is_high()), "non-zero padding");
                    rest = tail;
                }
            }
            Self { command, data }
        }
    }

    /// Returns every complete frame addressed to `pins.strobe`.
    pub fn frames(journal: &[(u32, Level)], pins: &UnitPins) -> Vec<DecodedFrame> {
        let mut frames = Vec::new();
        let mut bits: Option<Vec<Level>> = None;
        let mut data_level = Level::Low;

        for &(pin, level) in journal {
            if pin == pins.strobe {
                match level {
                    Level::Low => bits = Some(Vec::new()),
                    Level::High => {
                        if let Some(bits) = bits.take() {
                            frames.push(DecodedFrame::from_bits(&bits));
                        }
                    }
                }
            } else if pin == pins.data {
                data_level = level;
            } else if pin == pins.clock && level.is_high() {
                if let Some(bits) = bits.as_mut() {
                    bits.push(data_level);
                }
            }
        }
        frames
    }
}
