//! Page-packed 1bpp framebuffer
//!
//! Pixels are stored the way page-addressed controllers expect them: one
//! byte per column per page, where a page is a band of 8 rows. Pixel
//! `(x, y)` lives in byte `x + (y >> 3) * WIDTH`, bit `y & 7`.
//!
//! Every mutation extends a dirty rectangle which the repaint driver drains
//! to transmit only the page rows that changed. The dirty rectangle may
//! over-approximate the changed pixels but never under-approximates them.

use crate::geometry::{Point, Rect};

/// 128x64 buffer used by the common 0.96" and 1.3" modules
pub type Framebuffer128x64 = Framebuffer<128, 8>;

/// 128x32 buffer used by 0.91" modules
pub type Framebuffer128x32 = Framebuffer<128, 4>;

/// How a masked area is combined with existing pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Set,
    Clear,
    Toggle,
}

impl Op {
    #[inline]
    fn apply(self, byte: &mut u8, mask: u8) {
        match self {
            Op::Set => *byte |= mask,
            Op::Clear => *byte &= !mask,
            Op::Toggle => *byte ^= mask,
        }
    }
}

/// Bits `low..=high` of a page byte
#[inline]
fn page_mask(low: usize, high: usize) -> u8 {
    (0xFFu8 << low) & (0xFFu8 >> (7 - high))
}

/// Monochrome framebuffer of `WIDTH` columns and `PAGES` pages
///
/// The pixel height is `PAGES * 8`, so it is always a whole number of pages.
#[derive(Clone)]
pub struct Framebuffer<const WIDTH: usize, const PAGES: usize> {
    /// Pixel data, one row of column bytes per page
    pages: [[u8; WIDTH]; PAGES],
    /// Union of all pixels modified since the last drain
    dirty: Rect,
}

impl<const WIDTH: usize, const PAGES: usize> Default for Framebuffer<WIDTH, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WIDTH: usize, const PAGES: usize> Framebuffer<WIDTH, PAGES> {
    /// Pixel height
    pub const HEIGHT: usize = PAGES * 8;

    const VALID: () = assert!(
        WIDTH > 0 && PAGES > 0 && WIDTH <= i32::MAX as usize && PAGES <= (i32::MAX as usize) / 8,
        "framebuffer needs at least one column and one page"
    );

    /// Create a blank framebuffer
    ///
    /// The whole area starts dirty: the device RAM content is unknown until
    /// the first flush.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID;
        Self {
            pages: [[0; WIDTH]; PAGES],
            dirty: Self::bounds(),
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        WIDTH
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        Self::HEIGHT
    }

    /// Number of 8-row pages
    pub const fn page_count(&self) -> usize {
        PAGES
    }

    /// The full drawable area
    pub const fn bounds() -> Rect {
        Rect::new(
            Point::new(0, 0),
            Point::new(WIDTH as i32 - 1, (PAGES * 8) as i32 - 1),
        )
    }

    /// Flat byte view, `x + page * WIDTH`
    pub fn as_bytes(&self) -> &[u8] {
        self.pages.as_flattened()
    }

    /// Page rows
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Column bytes of a single page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Map a coordinate to (column, page, bit), if inside the buffer
    #[inline]
    fn locate(x: i32, y: i32) -> Option<(usize, usize, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= Self::HEIGHT {
            return None;
        }
        Some((x, y >> 3, (y & 7) as u32))
    }

    /// Read a pixel; outside the buffer reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((col, page, bit)) => self.pages[page][col] & (1 << bit) != 0,
            None => false,
        }
    }

    /// Set or clear a single pixel; outside the buffer is ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((col, page, bit)) = Self::locate(x, y) {
            if on {
                self.pages[page][col] |= 1 << bit;
            } else {
                self.pages[page][col] &= !(1 << bit);
            }
            let p = Point::new(x, y);
            self.invalidate(Rect::new(p, p));
        }
    }

    /// OR a byte into a page column; returns false when outside the buffer
    pub(crate) fn or_byte(&mut self, column: i32, page: i32, bits: u8) -> bool {
        if column < 0 || page < 0 || column as usize >= WIDTH || page as usize >= PAGES {
            return false;
        }
        self.pages[page as usize][column as usize] |= bits;
        true
    }

    /// Set every pixel to `fill` and mark the whole buffer dirty
    pub fn clear(&mut self, fill: bool) {
        let value = if fill { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
        self.invalidate_all();
    }

    /// OR set pixels of a bitmap into the buffer
    ///
    /// Source coordinates are offset by the origin. Pixels landing outside
    /// the buffer are skipped, unset pixels leave the target untouched.
    /// Returns the bounding box of the pixels actually written, which is
    /// also added to the dirty area.
    pub fn blit_bitmap<I>(&mut self, pixels: I, origin_x: i32, origin_y: i32) -> Rect
    where
        I: IntoIterator<Item = (i32, i32, bool)>,
    {
        let mut written = Rect::EMPTY;
        for (sx, sy, set) in pixels {
            if !set {
                continue;
            }
            let (x, y) = (origin_x.saturating_add(sx), origin_y.saturating_add(sy));
            if let Some((col, page, bit)) = Self::locate(x, y) {
                self.pages[page][col] |= 1 << bit;
                let p = Point::new(x, y);
                written = written.union(&Rect::new(p, p));
            }
        }
        self.invalidate(written);
        written
    }

    /// Blit a grid of rows of booleans
    pub fn blit_grid<R: AsRef<[bool]>>(&mut self, rows: &[R], origin_x: i32, origin_y: i32) -> Rect {
        let pixels = rows.iter().enumerate().flat_map(|(y, row)| {
            row.as_ref()
                .iter()
                .enumerate()
                .map(move |(x, &on)| (x as i32, y as i32, on))
        });
        self.blit_bitmap(pixels, origin_x, origin_y)
    }

    /// Blit a row-major, MSB-first packed 1bpp image
    ///
    /// Each row occupies `ceil(width / 8)` bytes; a trailing partial row is
    /// ignored.
    pub fn blit_packed(&mut self, data: &[u8], width: usize, origin_x: i32, origin_y: i32) -> Rect {
        if width == 0 {
            return Rect::EMPTY;
        }
        let stride = width.div_ceil(8);
        let pixels = data.chunks_exact(stride).enumerate().flat_map(|(y, row)| {
            (0..width).map(move |x| (x as i32, y as i32, row[x >> 3] & (0x80 >> (x & 7)) != 0))
        });
        self.blit_bitmap(pixels, origin_x, origin_y)
    }

    /// Apply `op` to every pixel of a rectangle already clipped to bounds
    ///
    /// Works a page at a time: a partial mask on the first page, whole bytes
    /// on the pages in between and a partial mask on the last page.
    fn apply_area(&mut self, rect: Rect, op: Op) {
        if rect.is_empty() {
            return;
        }
        let (left, right) = (rect.top_left.x as usize, rect.bottom_right.x as usize);
        let (top, bottom) = (rect.top_left.y as usize, rect.bottom_right.y as usize);
        let (first_page, last_page) = (top >> 3, bottom >> 3);

        for page in first_page..=last_page {
            let low = if page == first_page { top & 7 } else { 0 };
            let high = if page == last_page { bottom & 7 } else { 7 };
            let mask = page_mask(low, high);
            for byte in &mut self.pages[page][left..=right] {
                op.apply(byte, mask);
            }
        }
        self.invalidate(rect);
    }

    /// Draw a horizontal line, or erase it when `invert` is set
    ///
    /// Endpoints may come in any order and are clamped to the buffer.
    pub fn draw_h_line(&mut self, x1: i32, x2: i32, y: i32, invert: bool) {
        let rect = Rect::from_corners(x1, y, x2, y).intersection(&Self::bounds());
        self.apply_area(rect, if invert { Op::Clear } else { Op::Set });
    }

    /// Draw a vertical line, or erase it when `invert` is set
    ///
    /// Endpoints may come in any order and are clamped to the buffer.
    pub fn draw_v_line(&mut self, x: i32, y1: i32, y2: i32, invert: bool) {
        let rect = Rect::from_corners(x, y1, x, y2).intersection(&Self::bounds());
        self.apply_area(rect, if invert { Op::Clear } else { Op::Set });
    }

    /// Draw a rectangle outline, or erase it when `invert` is set
    pub fn draw_rect(&mut self, rect: Rect, invert: bool) {
        if rect.is_empty() {
            return;
        }
        let Rect {
            top_left: tl,
            bottom_right: br,
        } = rect;
        self.draw_h_line(tl.x, br.x, tl.y, invert);
        self.draw_h_line(tl.x, br.x, br.y, invert);
        self.draw_v_line(tl.x, tl.y, br.y, invert);
        self.draw_v_line(br.x, tl.y, br.y, invert);
    }

    /// Set or clear every pixel of a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, rect: Rect, on: bool) {
        let rect = rect.intersection(&Self::bounds());
        self.apply_area(rect, if on { Op::Set } else { Op::Clear });
    }

    /// Invert every pixel of a rectangle (selection highlight)
    pub fn invert_rect(&mut self, rect: Rect) {
        let rect = rect.intersection(&Self::bounds());
        self.apply_area(rect, Op::Toggle);
    }

    /// Add an area to the dirty rectangle, clipped to the buffer
    pub fn invalidate(&mut self, area: Rect) {
        self.dirty = self.dirty.union(&area.intersection(&Self::bounds()));
    }

    /// Mark the whole buffer dirty
    pub fn invalidate_all(&mut self) {
        self.dirty = Self::bounds();
    }

    /// Current dirty rectangle, without resetting it
    pub fn dirty_rect(&self) -> Rect {
        self.dirty
    }

    /// Take the dirty rectangle, leaving it empty
    pub fn take_dirty_rect(&mut self) -> Rect {
        core::mem::replace(&mut self.dirty, Rect::EMPTY)
    }
}
