//! The whole panel: two chips side by side.

use super::protocol::BRIGHTNESS_MASK;
use super::unit::DisplayUnit;
use crate::gpio::{Gpio, SysfsGpio};
use crate::pins::PanelPins;
use crate::status::Status;
use crate::text::{Layout, SCROLL_STEP};
use crate::{Error, Result, COLUMNS, LEFT_COLUMNS, RIGHT_COLUMNS};
use tracing::{debug, info, warn};

/// The 27-column panel.
///
/// Columns 0-13 live on the left chip; columns 14-26 and the status byte
/// on the right chip. Every combined operation goes left first and stops
/// at the first failure.
pub struct Screen<G: Gpio = SysfsGpio> {
    gpio: G,
    left: DisplayUnit,
    right: DisplayUnit,
}

impl<G: Gpio> Screen<G> {
    /// Configures the pins of both chips and puts them in write mode.
    pub fn open(mut gpio: G, pins: PanelPins) -> Result<Self> {
        let left = DisplayUnit::new(pins.left());
        let right = DisplayUnit::new(pins.right());
        left.init(&mut gpio)?;
        right.init(&mut gpio)?;

        let mut screen = Self { gpio, left, right };
        screen.set_display_mode()?;
        screen.set_data_mode()?;

        info!(
            "Screen opened (strobe {}/{}, clock {}, data {})",
            pins.strobe_left, pins.strobe_right, pins.clock, pins.data
        );
        Ok(screen)
    }

    /// Returns the GPIO backend.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Returns the GPIO backend mutably.
    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    /// Sends the display mode command to both chips.
    pub fn set_display_mode(&mut self) -> Result<()> {
        self.left.set_display_mode(&mut self.gpio)?;
        self.right.set_display_mode(&mut self.gpio)
    }

    /// Sends the data mode command to both chips.
    pub fn set_data_mode(&mut self) -> Result<()> {
        self.left.set_data_mode(&mut self.gpio)?;
        self.right.set_data_mode(&mut self.gpio)
    }

    /// Switches both chips on at `brightness` (low three bits used), or off.
    pub fn set_power(&mut self, on: bool, brightness: u8) -> Result<()> {
        self.left.set_power(&mut self.gpio, on, brightness)?;
        self.right.set_power(&mut self.gpio, on, brightness)?;
        debug!("Power {} (brightness {})", on, brightness & BRIGHTNESS_MASK);
        Ok(())
    }

    /// Writes one frame of at most 27 columns; missing columns are blank.
    pub fn write_frame(&mut self, columns: &[u8], status: Status) -> Result<()> {
        if columns.len() > COLUMNS {
            return Err(Error::FrameOverflow {
                max: COLUMNS,
                actual: columns.len(),
            });
        }
        let mut frame = [0u8; COLUMNS];
        frame[..columns.len()].copy_from_slice(columns);

        let mut right = [0u8; RIGHT_COLUMNS + 1];
        right[..RIGHT_COLUMNS].copy_from_slice(&frame[LEFT_COLUMNS..]);
        right[RIGHT_COLUMNS] = status.byte();

        self.left.write_columns(&mut self.gpio, &frame[..LEFT_COLUMNS])?;
        self.right.write_columns(&mut self.gpio, &right)
    }

    /// Shows `text`, blocking for the whole scroll if it does not fit.
    pub fn render(&mut self, text: &str, status: Status) -> Result<()> {
        match Layout::for_text(text) {
            Layout::Static(frame) => self.write_frame(&frame, status),
            Layout::Scroll(marquee) => {
                debug!("Scrolling {} frames", marquee.frame_count());
                for frame in marquee {
                    self.write_frame(&frame, status)?;
                    std::thread::sleep(SCROLL_STEP);
                }
                Ok(())
            }
        }
    }

    /// Shows `text`, yielding to the runtime between scroll frames.
    ///
    /// Dropping the future stops the scroll after the current frame.
    pub async fn render_async(&mut self, text: &str, status: Status) -> Result<()> {
        match Layout::for_text(text) {
            Layout::Static(frame) => self.write_frame(&frame, status),
            Layout::Scroll(marquee) => {
                debug!("Scrolling {} frames", marquee.frame_count());
                for frame in marquee {
                    self.write_frame(&frame, status)?;
                    tokio::time::sleep(SCROLL_STEP).await;
                }
                Ok(())
            }
        }
    }

    /// Blanks and powers off the panel, then releases every pin.
    ///
    /// Both chips are released even if the first one fails; the last
    /// release error is returned.
    pub fn shutdown(&mut self) -> Result<()> {
        if let Err(e) = self.set_power(false, 0) {
            warn!("Failed to power off: {}", e);
        }
        if let Err(e) = self.write_frame(&[], Status::empty()) {
            warn!("Failed to blank screen: {}", e);
        }
        self.gpio.release_handles();

        let left = self.left.release(&mut self.gpio);
        if let Err(e) = &left {
            warn!("Failed to release left unit: {}", e);
        }
        let right = self.right.release(&mut self.gpio);
        if let Err(e) = &right {
            warn!("Failed to release right unit: {}", e);
        }
        info!("Screen shut down");
        right.and(left)
    }
}
