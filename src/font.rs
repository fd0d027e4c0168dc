//! Tiny 5×7 bitmap font for HUD text and body labels.
//!
//! Each glyph is seven rows of five bits, most significant bit on the left.
//! Lower-case letters fold onto the capitals. The GPU canvas turns every lit
//! bit into one square instance, which keeps text on the same pipeline as the
//! planets.

use glam::DVec2;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance in glyph pixels, including one column of spacing.
pub const ADVANCE: usize = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT];

const BLANK: Glyph = [0; GLYPH_HEIGHT];

/// Rows for `c`, or `None` if the font has no such glyph.
pub fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        ' ' => BLANK,
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        _ => return None,
    };
    Some(rows)
}

/// Screen units per glyph pixel for text `size` units tall.
#[inline]
pub fn pixel_size(size: f32) -> f64 {
    size as f64 / GLYPH_HEIGHT as f64
}

/// Width of `text` at `size`, without the trailing spacing column.
pub fn text_width(text: &str, size: f32) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    (chars * ADVANCE - 1) as f64 * pixel_size(size)
}

/// Top-left corners of every lit pixel of `text` laid out from `origin`.
///
/// Characters without a glyph still take up a cell, so a stray symbol does
/// not shift the rest of the line.
pub fn layout(text: &str, origin: DVec2, size: f32) -> impl Iterator<Item = DVec2> + '_ {
    let px = pixel_size(size);
    text.chars().enumerate().flat_map(move |(column, c)| {
        let rows = glyph(c).unwrap_or(BLANK);
        let cell_x = origin.x + (column * ADVANCE) as f64 * px;
        (0..GLYPH_HEIGHT).flat_map(move |row| {
            (0..GLYPH_WIDTH).filter_map(move |col| {
                let lit = rows[row] & (1 << (GLYPH_WIDTH - 1 - col)) != 0;
                lit.then(|| DVec2::new(cell_x + col as f64 * px, origin.y + row as f64 * px))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SOLAR_SYSTEM;
    use crate::scene::HELP_LINES;

    #[test]
    fn test_every_hud_and_label_char_has_a_glyph() {
        let names = SOLAR_SYSTEM.iter().map(|b| b.name);
        let extra = ["PAUSED", "Speed: 0.10x   Day 1234567890"];
        for text in HELP_LINES.into_iter().chain(names).chain(extra) {
            for c in text.chars() {
                assert!(glyph(c).is_some(), "no glyph for {c:?} in {text:?}");
            }
        }
    }

    #[test]
    fn test_glyph_rows_fit_width() {
        for c in (' '..='~').filter_map(glyph) {
            assert!(c.iter().all(|row| *row < (1 << GLYPH_WIDTH)));
        }
    }

    #[test]
    fn test_lowercase_folds() {
        assert_eq!(glyph('e'), glyph('E'));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 7.0), 0.0);
        assert_eq!(text_width("A", 7.0), 5.0);
        assert_eq!(text_width("AB", 14.0), 22.0);
    }

    #[test]
    fn test_layout_counts_lit_pixels() {
        // 'L': six single pixels and a full bottom row
        let pixels: Vec<_> = layout("L", DVec2::ZERO, 7.0).collect();
        assert_eq!(pixels.len(), 11);
        assert!(pixels.contains(&DVec2::new(0.0, 0.0)));
        assert!(pixels.contains(&DVec2::new(4.0, 6.0)));
    }

    #[test]
    fn test_unknown_char_keeps_spacing() {
        let pixels: Vec<_> = layout("~I", DVec2::ZERO, 7.0).collect();
        assert!(pixels.iter().all(|p| p.x >= ADVANCE as f64));
    }
}
