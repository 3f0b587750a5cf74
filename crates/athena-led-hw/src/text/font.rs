//! Column font for the 5-row panel.
//!
//! Each byte is one column; bit 0 is the top row, bit 4 the bottom row.
//! Glyphs carry their own trailing blank column so they can be concatenated
//! directly.

/// Returns the columns for an uppercase character, or `None` if the panel
/// cannot show it.
pub fn glyph(c: char) -> Option<&'static [u8]> {
    let columns: &'static [u8] = match c {
        ' ' => &[0x00],

        '0' => &[0x1F, 0x11, 0x1F, 0x00],
        '1' => &[0x12, 0x1F, 0x10, 0x00],
        '2' => &[0x1D, 0x15, 0x17, 0x00],
        '3' => &[0x15, 0x15, 0x1F, 0x00],
        '4' => &[0x07, 0x04, 0x1F, 0x00],
        '5' => &[0x17, 0x15, 0x1D, 0x00],
        '6' => &[0x1F, 0x15, 0x1D, 0x00],
        '7' => &[0x01, 0x01, 0x1F, 0x00],
        '8' => &[0x1F, 0x15, 0x1F, 0x00],
        '9' => &[0x17, 0x15, 0x1F, 0x00],

        'A' => &[0x1E, 0x05, 0x1E, 0x00],
        'B' => &[0x1F, 0x15, 0x0A, 0x00],
        'C' => &[0x0E, 0x11, 0x11, 0x00],
        'D' => &[0x1F, 0x11, 0x0E, 0x00],
        'E' => &[0x1F, 0x15, 0x11, 0x00],
        'F' => &[0x1F, 0x05, 0x01, 0x00],
        'G' => &[0x0E, 0x11, 0x1D, 0x00],
        'H' => &[0x1F, 0x04, 0x1F, 0x00],
        'I' => &[0x11, 0x1F, 0x11, 0x00],
        'J' => &[0x08, 0x10, 0x0F, 0x00],
        'K' => &[0x1F, 0x04, 0x1B, 0x00],
        'L' => &[0x1F, 0x10, 0x10, 0x00],
        'M' => &[0x1F, 0x06, 0x1F, 0x00],
        'N' => &[0x1F, 0x01, 0x1E, 0x00],
        'O' => &[0x0E, 0x11, 0x0E, 0x00],
        'P' => &[0x1F, 0x05, 0x02, 0x00],
        'Q' => &[0x0E, 0x19, 0x1E, 0x00],
        'R' => &[0x1F, 0x05, 0x1A, 0x00],
        'S' => &[0x12, 0x15, 0x09, 0x00],
        'T' => &[0x01, 0x1F, 0x01, 0x00],
        'U' => &[0x1F, 0x10, 0x1F, 0x00],
        'V' => &[0x0F, 0x10, 0x0F, 0x00],
        'W' => &[0x1F, 0x0C, 0x1F, 0x00],
        'X' => &[0x1B, 0x04, 0x1B, 0x00],
        'Y' => &[0x03, 0x1C, 0x03, 0x00],
        'Z' => &[0x19, 0x15, 0x13, 0x00],

        '+' => &[0x04, 0x0E, 0x04, 0x00],
        '-' => &[0x04, 0x04, 0x04, 0x00],
        '*' => &[0x0A, 0x04, 0x0A, 0x00],
        '/' => &[0x18, 0x04, 0x03, 0x00],
        '=' => &[0x0A, 0x0A, 0x0A, 0x00],
        '.' => &[0x10, 0x00],
        // Same width as two spaces, so a blinking colon keeps the layout still
        ':' | '：' => &[0x0A, 0x00],
        '℃' => &[0x03, 0x03, 0x00, 0x0E, 0x11, 0x11, 0x00],
        '↘' => &[0x11, 0x12, 0x1C, 0x00],
        '↗' => &[0x11, 0x09, 0x07, 0x00],

        _ => return None,
    };
    Some(columns)
}
