//! Fixed-width bitmap text
//!
//! Glyphs are placed one column apart (`glyph_width + 1` per character).
//! Each glyph column is a vertical bit pattern; it is shifted down by the
//! row offset inside the first page and the overflow spills into the next
//! page, so text can start on any row.
//!
//! Bold is a double strike: every destination byte is also ORed into the
//! column to its right. The last column's strike lands in the spacing
//! column, which is why a bold string measures one pixel wider.

use crate::font::{FontError, Glyph, GlyphTable};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

/// Renders text from a [`GlyphTable`] into a framebuffer
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'a> {
    glyphs: GlyphTable<'a>,
}

impl<'a> TextRenderer<'a> {
    /// Create a renderer for a font
    pub fn new(glyphs: GlyphTable<'a>) -> Self {
        Self { glyphs }
    }

    /// The font in use
    pub fn glyphs(&self) -> &GlyphTable<'a> {
        &self.glyphs
    }

    /// Glyph width in pixels
    pub fn glyph_width(&self) -> i32 {
        i32::from(self.glyphs.glyph_width())
    }

    /// Glyph height in pixels
    pub fn glyph_height(&self) -> i32 {
        i32::from(self.glyphs.glyph_height())
    }

    /// Horizontal distance between consecutive characters
    fn advance(&self) -> i32 {
        self.glyph_width() + 1
    }

    /// Pixel width of a string
    pub fn measure(&self, text: &str, bold: bool) -> i32 {
        (text.chars().count() as i32)
            .saturating_mul(self.advance())
            .saturating_add(i32::from(bold))
    }

    /// Area cleared before drawing, before clipping
    ///
    /// One column of margin on each side of the measured width, glyph
    /// height rows from `y`.
    pub fn text_rect(&self, text: &str, x: i32, y: i32, bold: bool) -> Rect {
        let width = self.measure(text, bold);
        Rect::from_corners(
            x.saturating_sub(1),
            y,
            x.saturating_add(width),
            y.saturating_add(self.glyph_height() - 1),
        )
    }

    /// Clear the area a string occupies
    ///
    /// Returns the cleared rectangle, clipped to the buffer.
    pub fn erase<const W: usize, const P: usize>(
        &self,
        fb: &mut Framebuffer<W, P>,
        text: &str,
        x: i32,
        y: i32,
        bold: bool,
    ) -> Rect {
        let area = self
            .text_rect(text, x, y, bold)
            .intersection(&Framebuffer::<W, P>::bounds());
        fb.fill_rect(area, false);
        area
    }

    /// Draw a string with its top-left corner at `(x, y)`
    ///
    /// The area is erased first so a shorter string leaves no ghost of the
    /// previous one. Characters above code 255 are rejected before anything
    /// is touched. Pixels outside the buffer are clipped silently.
    ///
    /// Returns the modified rectangle, which is also marked dirty.
    pub fn draw<const W: usize, const P: usize>(
        &self,
        fb: &mut Framebuffer<W, P>,
        text: &str,
        x: i32,
        y: i32,
        bold: bool,
    ) -> Result<Rect, FontError> {
        for ch in text.chars() {
            self.glyphs.glyph(ch)?;
        }

        let erased = self.erase(fb, text, x, y, bold);
        let mut drawn = Rect::EMPTY;
        let mut origin = x;
        for ch in text.chars() {
            let glyph = self.glyphs.glyph(ch)?;
            drawn = drawn.union(&self.draw_glyph(fb, glyph, origin, y, bold));
            origin = origin.saturating_add(self.advance());
        }
        fb.invalidate(drawn);

        let modified = erased.union(&drawn);
        trace!(
            "text at ({}, {}): {} chars, {}x{} px",
            x,
            y,
            text.len(),
            modified.width(),
            modified.height()
        );
        Ok(modified)
    }

    /// Blit one glyph; returns the columns written over the glyph rows
    fn draw_glyph<const W: usize, const P: usize>(
        &self,
        fb: &mut Framebuffer<W, P>,
        glyph: Glyph<'_>,
        x: i32,
        y: i32,
        bold: bool,
    ) -> Rect {
        let (width, height) = (W as i32, (P * 8) as i32);
        let (glyph_width, glyph_height) = (self.glyph_width(), self.glyph_height());
        let extent = glyph_width + i32::from(bold);

        if x.saturating_add(extent) <= 0 || x >= width || y.saturating_add(glyph_height) <= 0 || y >= height {
            return Rect::EMPTY;
        }

        let first_page = y >> 3;
        let shift = (y & 7) as u32;
        let spill = self.glyphs.bytes_per_column() as i32;
        let row_mask = u32::MAX >> (32 - glyph_height as u32);

        let (mut left, mut right) = (i32::MAX, i32::MIN);
        for (offset, bits) in glyph.columns().enumerate() {
            let column = x + offset as i32;
            let strike = column + 1;
            let strike_visible = bold && strike >= 0 && strike < width;
            if !strike_visible && (column < 0 || column >= width) {
                continue;
            }

            let shifted = u64::from(bits & row_mask) << shift;
            for k in 0..=spill {
                let byte = (shifted >> (8 * k)) as u8;
                let page = first_page + k;
                if byte == 0 || page < 0 {
                    continue;
                }
                if page as usize >= P {
                    break;
                }
                if fb.or_byte(column, page, byte) {
                    left = left.min(column);
                    right = right.max(column);
                }
                if strike_visible && fb.or_byte(strike, page, byte) {
                    left = left.min(strike);
                    right = right.max(strike);
                }
            }
        }

        if left > right {
            return Rect::EMPTY;
        }
        Rect::from_corners(left, y, right, y + glyph_height - 1)
            .intersection(&Framebuffer::<W, P>::bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::encoded_len;
    use crate::geometry::Point;
    use crate::testing;
    use proptest::prelude::*;

    fn blank<const W: usize, const P: usize>() -> Framebuffer<W, P> {
        let mut fb = Framebuffer::new();
        fb.take_dirty_rect();
        fb
    }

    #[test]
    fn test_measure() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        assert_eq!(text.measure("AB", false), 12);
        assert_eq!(text.measure("AB", true), 13);
        assert_eq!(text.measure("", false), 0);
        // Counted in characters, not bytes
        assert_eq!(text.measure("éé", false), 12);
    }

    #[test]
    fn test_draw_page_aligned() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<32, 2>();

        let rect = text.draw(&mut fb, "AB", 2, 8, false).unwrap();

        let page1 = fb.page(1).unwrap();
        assert_eq!(&page1[2..7], &[0xFF; 5]);
        assert_eq!(page1[7], 0, "spacing column");
        assert_eq!(&page1[8..13], &[0xFF; 5]);
        assert_eq!(page1[13], 0);
        assert!(fb.page(0).unwrap().iter().all(|&b| b == 0));

        assert_eq!(rect, Rect::from_corners(1, 8, 14, 15));
        assert_eq!(fb.take_dirty_rect(), rect);
    }

    #[test]
    fn test_draw_shifted_across_pages() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 2>();

        text.draw(&mut fb, "A", 0, 3, false).unwrap();

        assert_eq!(fb.page(0).unwrap()[0], 0b1111_1000);
        assert_eq!(fb.page(1).unwrap()[4], 0b0000_0111);
        assert_eq!(fb.page(0).unwrap()[5], 0);
        assert!(!fb.pixel(0, 11));
    }

    #[test]
    fn test_draw_tall_font() {
        let blob: [u8; encoded_len(3, 12)] = testing::font(3, 12, |_, _| 0xFFFF);
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<8, 3>();

        let rect = text.draw(&mut fb, "x", 1, 5, false).unwrap();

        // Rows 5..=16
        assert_eq!(fb.page(0).unwrap()[1], 0b1110_0000);
        assert_eq!(fb.page(1).unwrap()[1], 0xFF);
        assert_eq!(fb.page(2).unwrap()[1], 0b0000_0001);
        assert_eq!(rect, Rect::from_corners(0, 5, 5, 16));
    }

    #[test]
    fn test_left_clip() {
        let blob: [u8; encoded_len(5, 8)] = testing::font(5, 8, |_, column| 1 << column);
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 1>();

        let rect = text.draw(&mut fb, "A", -3, 0, false).unwrap();

        // Glyph columns 3 and 4 land on buffer columns 0 and 1
        assert_eq!(&fb.as_bytes()[..3], &[1 << 3, 1 << 4, 0]);
        assert_eq!(rect.top_left, Point::new(0, 0));
    }

    #[test]
    fn test_wholly_outside_is_skipped() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 1>();

        let rect = text.draw(&mut fb, "A", 40, 0, false).unwrap();
        assert!(rect.is_empty());
        text.draw(&mut fb, "A", 0, -20, false).unwrap();
        text.draw(&mut fb, "A", -12, 0, false).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_negative_y_clips_top_rows() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<8, 1>();

        text.draw(&mut fb, "A", 0, -3, false).unwrap();
        assert_eq!(fb.as_bytes()[0], 0b0001_1111);
    }

    #[test]
    fn test_bottom_clip() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<8, 8>();

        let rect = text.draw(&mut fb, "A", 0, 60, false).unwrap();
        assert_eq!(fb.page(7).unwrap()[0], 0xF0);
        assert_eq!(rect.bottom_right.y, 63);
    }

    #[test]
    fn test_bold_double_strike() {
        // Only the first column of each glyph is set
        let blob: [u8; encoded_len(5, 8)] = testing::font(5, 8, |_, column| if column == 0 { 0x3C } else { 0 });
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 1>();

        let rect = text.draw(&mut fb, "AB", 0, 0, true).unwrap();

        assert_eq!(&fb.as_bytes()[..8], &[0x3C, 0x3C, 0, 0, 0, 0, 0x3C, 0x3C]);
        assert_eq!(rect, Rect::from_corners(0, 0, 13, 7));
    }

    #[test]
    fn test_bold_stops_at_last_column() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<8, 1>();

        let rect = text.draw(&mut fb, "A", 3, 0, true).unwrap();
        assert_eq!(&fb.as_bytes()[3..], &[0xFF; 5]);
        assert_eq!(rect.bottom_right.x, 7);
    }

    #[test]
    fn test_bold_strike_from_offscreen_column() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<8, 1>();

        // Last glyph column at x = -1 strikes into column 0
        text.draw(&mut fb, "A", -5, 0, true).unwrap();
        assert_eq!(fb.as_bytes()[0], 0xFF);
        assert_eq!(fb.as_bytes()[1], 0);
    }

    #[test]
    fn test_erase_before_draw() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 2>();
        fb.clear(true);
        fb.take_dirty_rect();

        let rect = text.draw(&mut fb, " ", 4, 4, false).unwrap();

        assert_eq!(rect, Rect::from_corners(3, 4, 10, 11));
        for x in 3..=10 {
            for y in 4..=11 {
                assert!(!fb.pixel(x, y), "({}, {}) not erased", x, y);
            }
        }
        assert!(fb.pixel(2, 4));
        assert!(fb.pixel(11, 4));
        assert!(fb.pixel(3, 3));
        assert!(fb.pixel(3, 12));
    }

    #[test]
    fn test_invalid_character_leaves_buffer_untouched() {
        let blob = testing::solid_font_5x8();
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<16, 1>();
        fb.clear(true);
        fb.take_dirty_rect();

        assert_eq!(text.draw(&mut fb, "A€", 0, 0, false), Err(FontError::InvalidCharacter));
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        assert!(fb.dirty_rect().is_empty());
    }

    #[test]
    fn test_glyph_bits_above_height_are_ignored() {
        // 6 rows stored in one byte with junk in the top two bits
        let mut blob = [0u8; encoded_len(2, 6)];
        blob[0] = 2;
        blob[1] = 6;
        blob[2..].fill(0xFF);
        let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
        let mut fb = blank::<4, 1>();

        text.draw(&mut fb, "A", 0, 0, false).unwrap();
        assert_eq!(fb.as_bytes()[0], 0b0011_1111);
    }

    proptest! {
        #[test]
        fn prop_erase_undoes_draw(
            s in "[ -~]{0,6}",
            x in -10i32..70,
            y in -10i32..40,
            bold in any::<bool>(),
        ) {
            let blob: [u8; encoded_len(5, 12)] =
                testing::font(5, 12, |code, column| u32::from(code).rotate_left(u32::from(column)));
            let text = TextRenderer::new(GlyphTable::load(&blob).unwrap());
            let mut fb = blank::<64, 4>();

            let rect = text.draw(&mut fb, &s, x, y, bold).unwrap();
            let dirty = fb.take_dirty_rect();
            prop_assert_eq!(dirty, rect);
            for py in 0..32 {
                for px in 0..64 {
                    if fb.pixel(px, py) {
                        prop_assert!(rect.contains(Point::new(px, py)));
                    }
                }
            }

            text.erase(&mut fb, &s, x, y, bold);
            prop_assert!(fb.as_bytes().iter().all(|&b| b == 0));
        }
    }
}
