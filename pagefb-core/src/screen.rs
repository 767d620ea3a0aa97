//! Drawing session
//!
//! Bundles the framebuffer with the font and repaint state that would
//! otherwise be passed around on every call.

use crate::font::{FontError, GlyphTable};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::repaint::{RepaintDriver, RepaintStats};
use crate::text::TextRenderer;
use crate::traits::PageDevice;

/// Framebuffer plus font plus repaint driver
pub struct Screen<'a, const W: usize, const P: usize> {
    fb: Framebuffer<W, P>,
    text: TextRenderer<'a>,
    repaint: RepaintDriver,
}

impl<'a, const W: usize, const P: usize> Screen<'a, W, P> {
    /// New session with a blank, fully dirty framebuffer
    pub fn new(glyphs: GlyphTable<'a>) -> Self {
        Self {
            fb: Framebuffer::new(),
            text: TextRenderer::new(glyphs),
            repaint: RepaintDriver::new(),
        }
    }

    /// Draw a string, erasing behind it
    pub fn text(&mut self, x: i32, y: i32, text: &str, bold: bool) -> Result<Rect, FontError> {
        self.text.draw(&mut self.fb, text, x, y, bold)
    }

    /// Erase the area a string would occupy
    pub fn erase_text(&mut self, x: i32, y: i32, text: &str, bold: bool) -> Rect {
        self.text.erase(&mut self.fb, text, x, y, bold)
    }

    /// Pixel width of a string in the session font
    pub fn measure(&self, text: &str, bold: bool) -> i32 {
        self.text.measure(text, bold)
    }

    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, invert: bool) {
        self.fb.draw_h_line(x1, x2, y, invert);
    }

    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, invert: bool) {
        self.fb.draw_v_line(x, y1, y2, invert);
    }

    /// Fill the whole screen
    pub fn clear(&mut self, fill: bool) {
        self.fb.clear(fill);
    }

    pub fn framebuffer(&self) -> &Framebuffer<W, P> {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<W, P> {
        &mut self.fb
    }

    pub fn renderer(&self) -> &TextRenderer<'a> {
        &self.text
    }

    /// Send pending changes to the device
    pub fn flush<D: PageDevice>(&mut self, device: &mut D) -> Result<usize, D::Error> {
        self.repaint.flush(&mut self.fb, device)
    }

    pub fn stats(&self) -> RepaintStats {
        self.repaint.stats()
    }
}
