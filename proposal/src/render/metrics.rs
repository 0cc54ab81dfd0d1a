//! Times-Roman glyph widths (Adobe core-14 AFM, units of 1/1000 em) and WinAnsi encoding.

/// Widths for bytes 32..=126.
const ASCII_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // ' '..'/'
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // '0'..'9'
    278, 278, 564, 564, 564, 444, 921, // ':'..'@'
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, 556, 722, 667,
    556, 611, 722, 722, 944, 722, 722, 611, // 'A'..'Z'
    333, 278, 333, 469, 500, 333, // '['..'`'
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, 500, 500, 333,
    389, 278, 500, 500, 722, 500, 500, 444, // 'a'..'z'
    480, 200, 480, 541, // '{'..'~'
];

const DEFAULT_WIDTH: u16 = 500;

/// Width of one WinAnsi-encoded byte.
pub fn byte_width(b: u8) -> u16 {
    match b {
        32..=126 => ASCII_WIDTHS[(b - 32) as usize],
        0x85 | 0x97 => 1000, // ellipsis, em dash
        0x91 | 0x92 => 333,  // single quotes
        0x93 | 0x94 => 444,  // double quotes
        0x95 => 350,         // bullet
        _ => DEFAULT_WIDTH,
    }
}

/// Width of encoded text at `font_size` points.
pub fn text_width(encoded: &[u8], font_size: f32) -> f32 {
    let units: u32 = encoded.iter().map(|&b| u32::from(byte_width(b))).sum();
    units as f32 * font_size / 1000.0
}

/// Encodes one char for a WinAnsi Type1 font. Typographic punctuation that models like to
/// emit is mapped to its WinAnsi slot; anything else outside Latin-1 becomes `?`.
pub fn encode_char(c: char) -> u8 {
    match c {
        '\u{20AC}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\t' => b' ',
        c if (c as u32) < 0x20 => b'?',
        c if (c as u32) <= 0x7E => c as u8,
        c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
        _ => b'?',
    }
}

pub fn encode(s: &str) -> Vec<u8> {
    s.chars().map(encode_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_spot_checks() {
        assert_eq!(byte_width(b' '), 250);
        assert_eq!(byte_width(b'0'), 500);
        assert_eq!(byte_width(b'A'), 722);
        assert_eq!(byte_width(b'W'), 944);
        assert_eq!(byte_width(b'm'), 778);
        assert_eq!(byte_width(b'z'), 444);
        assert_eq!(byte_width(b'~'), 541);
    }

    #[test]
    fn width_scales_with_font_size() {
        // "Hi" = 722 + 278 units
        assert!((text_width(b"Hi", 12.0) - 12.0).abs() < 1e-4);
        assert!((text_width(b"Hi", 24.0) - 24.0).abs() < 1e-4);
    }

    #[test]
    fn encodes_latin1_and_typographic_punctuation() {
        assert_eq!(encode("café"), b"caf\xE9".to_vec());
        assert_eq!(encode("\u{201C}ok\u{201D} \u{2014} 5\u{20AC}"), b"\x93ok\x94 \x97 5\x80".to_vec());
        assert_eq!(encode("日本"), b"??".to_vec());
    }
}
