//! Glyph blitting and the text cursor

use crate::graphics::font::Font;
use crate::graphics::framebuffer::FrameBuffer;
use crate::pcd8544::error::Error;

/// Code used for characters that have no 8-bit code, it renders as the missing glyph.
const UNMAPPED: u8 = 0xFF;

/// Pixel position where the next glyph's top-left corner lands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}

impl Cursor {
    /// Step past a glyph of `columns` x `rows` at `scale`, wrapping to the next text line
    /// and finally back to the origin.
    pub fn advance(&mut self, font: &Font, scale: u8, width: u16, height: u16) {
        let step_x = u32::from(font.columns) * u32::from(scale) + 1;
        let step_y = u32::from(font.rows) * u32::from(scale) + 1;

        let x = u32::from(self.x) + step_x;
        if x < u32::from(width) {
            self.x = x as u16;
            return;
        }

        self.x = 0;
        let y = u32::from(self.y) + step_y;
        if y < u32::from(height) {
            self.y = y as u16;
        } else {
            // back to the top, whatever is drawn there gets overwritten
            self.y = 0;
        }
    }
}

/// Blit one glyph at the cursor and advance it.
///
/// Source bit `row / scale` of column `column / scale` decides each scaled pixel; only set
/// bits are plotted. Pixels past the buffer edge are clipped. A code the font lacks is
/// drawn as a solid block. Fonts taller than 8 rows are rejected.
pub fn draw_glyph(
    buffer: &mut FrameBuffer,
    font: &Font,
    cursor: &mut Cursor,
    code: u8,
    scale: u8,
) -> Result<(), Error> {
    if scale == 0 {
        return Err(Error::InvalidArgument);
    }
    font.validate()?;
    let glyph = font.glyph(code);
    let scale = i32::from(scale);
    let origin_x = i32::from(cursor.x);
    let origin_y = i32::from(cursor.y);

    for column in 0..i32::from(font.columns) * scale {
        let bits = glyph.map_or(0xFF, |columns| columns[(column / scale) as usize]);
        for row in 0..i32::from(font.rows) * scale {
            if bits >> (row / scale) & 1 == 0 {
                continue;
            }
            let (x, y) = (origin_x + column, origin_y + row);
            if buffer.contains(x, y) {
                buffer.set_pixel(x, y, true)?;
            }
        }
    }

    cursor.advance(font, scale as u8, buffer.width(), buffer.height());
    Ok(())
}

/// Render `text` starting at the current cursor.
pub fn draw_text(
    buffer: &mut FrameBuffer,
    font: &Font,
    cursor: &mut Cursor,
    text: &str,
    scale: u8,
) -> Result<(), Error> {
    if scale == 0 {
        return Err(Error::InvalidArgument);
    }
    font.validate()?;
    for c in text.chars() {
        let code = u8::try_from(u32::from(c)).unwrap_or(UNMAPPED);
        draw_glyph(buffer, font, cursor, code, scale)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::font::FONT_5X7;

    fn buffer() -> FrameBuffer {
        FrameBuffer::new(84, 48).unwrap()
    }

    #[test]
    fn glyph_advances_by_width_plus_spacing() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'A', 1).unwrap();
        assert_eq!(cursor, Cursor { x: 6, y: 0 });
    }

    #[test]
    fn glyph_pixels_follow_column_bits() {
        let mut fb = buffer();
        let mut cursor = Cursor { x: 10, y: 8 };
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'!', 1).unwrap();

        // '!' is column 2 = 0x5f: rows 0..=4 and row 6
        for row in 0..7 {
            assert_eq!(fb.get_pixel(12, 8 + row), Ok(row != 5), "row {}", row);
        }
        assert_eq!(fb.lit_pixels(), 6);
    }

    #[test]
    fn scaled_glyph_repeats_each_bit() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'!', 2).unwrap();

        assert_eq!(fb.lit_pixels(), 6 * 4);
        for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 9), (4, 12), (5, 13)] {
            assert_eq!(fb.get_pixel(x, y), Ok(true), "({}, {})", x, y);
        }
        assert_eq!(fb.get_pixel(4, 10), Ok(false));
        assert_eq!(cursor, Cursor { x: 11, y: 0 });
    }

    #[test]
    fn space_draws_nothing_but_advances() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b' ', 3).unwrap();
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(cursor.x, 16);
    }

    #[test]
    fn missing_glyph_is_a_block() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, 0x7F, 1).unwrap();
        assert_eq!(fb.lit_pixels(), 35);
    }

    #[test]
    fn wraps_to_next_line_at_the_right_edge() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        // 14 glyphs of 6 columns fill exactly 84
        draw_text(&mut fb, &FONT_5X7, &mut cursor, "ABCDEFGHIJKLM", 1).unwrap();
        assert_eq!(cursor, Cursor { x: 78, y: 0 });
        draw_text(&mut fb, &FONT_5X7, &mut cursor, "N", 1).unwrap();
        assert_eq!(cursor, Cursor { x: 0, y: 8 });
    }

    #[test]
    fn scaled_wrap_steps_scaled_line_height() {
        let mut fb = buffer();
        let mut cursor = Cursor { x: 70, y: 0 };
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'x', 3).unwrap();
        assert_eq!(cursor, Cursor { x: 0, y: 22 });
    }

    #[test]
    fn wraps_to_origin_past_the_bottom() {
        let mut fb = buffer();
        let mut cursor = Cursor { x: 78, y: 40 };
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'A', 1).unwrap();
        assert_eq!(cursor, Cursor { x: 0, y: 0 });
    }

    #[test]
    fn glyph_at_the_edge_is_clipped() {
        let mut fb = buffer();
        let mut cursor = Cursor { x: 81, y: 44 };
        draw_glyph(&mut fb, &FONT_5X7, &mut cursor, 0x7F, 1).unwrap();
        // 3 columns x 4 rows remain inside
        assert_eq!(fb.lit_pixels(), 12);
    }

    #[test]
    fn non_latin_characters_render_as_missing() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        draw_text(&mut fb, &FONT_5X7, &mut cursor, "→", 1).unwrap();
        assert_eq!(fb.lit_pixels(), 35);
        assert_eq!(cursor.x, 6);
    }

    #[test]
    fn tall_font_is_rejected_untouched() {
        static TALL: Font = Font {
            first: b'A',
            columns: 2,
            rows: 9,
            data: &[0xFF, 0xFF],
        };
        let mut fb = buffer();
        let mut cursor = Cursor { x: 4, y: 4 };
        assert_eq!(
            draw_glyph(&mut fb, &TALL, &mut cursor, b'A', 1),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            draw_text(&mut fb, &TALL, &mut cursor, "AA", 2),
            Err(Error::InvalidArgument)
        );
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(cursor, Cursor { x: 4, y: 4 });
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut fb = buffer();
        let mut cursor = Cursor::default();
        assert_eq!(
            draw_glyph(&mut fb, &FONT_5X7, &mut cursor, b'A', 0),
            Err(Error::InvalidArgument)
        );
        assert_eq!(cursor, Cursor::default());
    }
}
