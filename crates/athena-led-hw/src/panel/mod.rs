//! Panel control.
//!
//! Two chips, each fed over a bit-banged serial link sharing clock and data
//! lines with its own strobe.

mod screen;
mod unit;

pub mod protocol;

pub use protocol::Command;
pub use screen::Screen;
pub use unit::DisplayUnit;
