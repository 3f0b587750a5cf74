//! Content sources.
//!
//! Each source produces a string for the panel; failures are reported so
//! the rotation can skip the option.

pub mod clock;
pub mod http;
pub mod thermal;

pub use thermal::ThermalZones;
