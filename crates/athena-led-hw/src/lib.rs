//! Athena LED Hardware Library
//!
//! Drives the dual-chip segment LED panel found on OpenWrt routers over
//! three shared GPIO lines (clock, data) plus one strobe line per chip.

pub mod error;
pub mod gpio;
pub mod panel;
pub mod pins;
pub mod status;
pub mod text;

pub use error::{Error, Result};
pub use gpio::{Gpio, Level, SimulatedGpio, SysfsGpio};
pub use panel::{DisplayUnit, Screen};
pub use pins::{PanelPins, UnitPins};
pub use status::Status;
pub use text::{Layout, Marquee};

/// Number of columns on the whole panel.
pub const COLUMNS: usize = 27;

/// Columns driven by the left chip.
pub const LEFT_COLUMNS: usize = 14;

/// Columns driven by the right chip (its last byte carries the status).
pub const RIGHT_COLUMNS: usize = COLUMNS - LEFT_COLUMNS;

/// One logical frame of column bytes.
pub type Columns = [u8; COLUMNS];
