//! Text to column conversion and frame layout.
//!
//! Text that fits on the panel is centered in a single frame. Anything
//! wider scrolls: frame `i` (1-based) shows `columns[i-27..i]` drawn from
//! the left edge, so the text first grows one column per frame until the
//! panel is full and then moves left one column per frame until its last
//! column reaches the right edge.

pub mod font;

use crate::{Columns, COLUMNS};
use std::time::Duration;

/// Delay between two scroll frames.
pub const SCROLL_STEP: Duration = Duration::from_millis(128);

/// Converts text to panel columns.
///
/// Letters are uppercased; characters without a glyph are skipped.
pub fn encode(text: &str) -> Vec<u8> {
    text.to_uppercase()
        .chars()
        .filter_map(font::glyph)
        .flatten()
        .copied()
        .collect()
}

/// Centers `columns` in a blank frame. Odd leftover space goes to the right.
///
/// Input wider than the panel is cut at the right edge.
pub fn center(columns: &[u8]) -> Columns {
    let mut frame = [0u8; COLUMNS];
    let len = columns.len().min(COLUMNS);
    let offset = (COLUMNS - len) / 2;
    frame[offset..offset + len].copy_from_slice(&columns[..len]);
    frame
}

/// How a piece of text is put on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Fits: one centered frame.
    Static(Columns),
    /// Too wide: scrolled frame by frame.
    Scroll(Marquee),
}

impl Layout {
    /// Picks the layout for already encoded columns.
    pub fn new(columns: Vec<u8>) -> Self {
        if columns.len() > COLUMNS {
            Layout::Scroll(Marquee::new(columns))
        } else {
            Layout::Static(center(&columns))
        }
    }

    /// Encodes `text` and picks its layout.
    pub fn for_text(text: &str) -> Self {
        Self::new(encode(text))
    }

    /// Number of frames this layout produces.
    pub fn frame_count(&self) -> usize {
        match self {
            Layout::Static(_) => 1,
            Layout::Scroll(marquee) => marquee.frame_count(),
        }
    }
}

/// Scrolling window over a column buffer.
///
/// Yields one frame per column, then stops; it never loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    columns: Vec<u8>,
    step: usize,
}

impl Marquee {
    /// Creates a marquee positioned before its first frame.
    pub fn new(columns: Vec<u8>) -> Self {
        Self { columns, step: 0 }
    }

    /// Total number of frames, including those already yielded.
    ///
    /// [`ExactSizeIterator::len`] gives the frames still to come.
    pub fn frame_count(&self) -> usize {
        self.columns.len()
    }

    /// First visible column of the frame last returned.
    pub fn start(&self) -> usize {
        self.step.saturating_sub(COLUMNS)
    }
}

impl Iterator for Marquee {
    type Item = Columns;

    fn next(&mut self) -> Option<Columns> {
        if self.step >= self.columns.len() {
            return None;
        }
        self.step += 1;

        let window = &self.columns[self.start()..self.step];
        let mut frame = [0u8; COLUMNS];
        frame[..window.len()].copy_from_slice(window);
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.columns.len() - self.step;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Marquee {}
