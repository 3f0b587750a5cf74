//! Status indicators.
//!
//! The right chip receives one extra byte after its columns. Its low four
//! bits light the indicator icons next to the digits.

use bitflags::bitflags;

bitflags! {
    /// Indicator icons, sent as the final byte to the right chip.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        /// Clock icon.
        const TIME = 0b0000_0001;
        /// Medal icon.
        const MEDAL = 0b0000_0010;
        /// Upload arrow.
        const UPLOAD = 0b0000_0100;
        /// Download arrow.
        const DOWNLOAD = 0b0000_1000;
    }
}

impl Status {
    /// Parses a space-separated list of indicator names.
    ///
    /// Unknown names are ignored, so an empty or garbled list lights nothing.
    pub fn from_words(words: &str) -> Self {
        words
            .split_whitespace()
            .fold(Status::empty(), |status, word| match word {
                "time" => status | Status::TIME,
                "medal" => status | Status::MEDAL,
                "upload" => status | Status::UPLOAD,
                "download" => status | Status::DOWNLOAD,
                _ => status,
            })
    }

    /// Builds a status from a raw byte, keeping the four indicator bits.
    pub fn from_byte(value: u8) -> Self {
        Self::from_bits_truncate(value)
    }

    /// Returns the byte put on the wire.
    pub fn byte(self) -> u8 {
        self.bits()
    }
}
