//! Error types for the Athena LED hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// Pin could not be exported to userspace.
    #[error("Failed to export GPIO {pin}: {source}")]
    Export {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Pin direction could not be set to output.
    #[error("Failed to set direction of GPIO {pin}: {source}")]
    Direction {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Writing a level to a pin failed mid-transmission.
    #[error("Failed to write GPIO {pin}: {source}")]
    Write {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Pin could not be released back to the kernel.
    #[error("Failed to release GPIO {pin}: {source}")]
    Release {
        pin: u32,
        #[source]
        source: std::io::Error,
    },

    /// Pin was written before being exported and configured.
    #[error("GPIO {0} is not configured as an output")]
    NotOutput(u32),

    /// Frame handed to the screen is wider than the panel.
    #[error("Frame too wide: at most {max} columns, got {actual}")]
    FrameOverflow { max: usize, actual: usize },
}
