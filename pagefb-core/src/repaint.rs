//! Partial repaint
//!
//! A flush drains the framebuffer's dirty rectangle and sends only the
//! page rows it covers. For every page between the top and bottom of the
//! rectangle the device cursor is placed on the left column and the bytes
//! up to the right column are written in one burst.

use crate::framebuffer::Framebuffer;
use crate::traits::{PageDevice, PageDeviceExt};

/// Running totals across flushes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepaintStats {
    /// Flushes that transmitted something
    pub flushes: u32,
    /// Page rows sent
    pub page_rows: u32,
    /// Column bytes sent
    pub bytes: u32,
}

/// Pushes dirty regions of a framebuffer to a [`PageDevice`]
#[derive(Debug, Default)]
pub struct RepaintDriver {
    stats: RepaintStats,
}

impl RepaintDriver {
    pub const fn new() -> Self {
        Self {
            stats: RepaintStats {
                flushes: 0,
                page_rows: 0,
                bytes: 0,
            },
        }
    }

    /// Totals since creation
    pub fn stats(&self) -> RepaintStats {
        self.stats
    }

    /// Transmit the dirty area and clear it
    ///
    /// Returns the number of bytes written, zero when nothing was dirty.
    /// The dirty rectangle is drained before any transfer, so an error
    /// part way leaves it empty; call [`Framebuffer::invalidate_all`] to
    /// force a full resend after recovering the device.
    pub fn flush<D, const W: usize, const P: usize>(
        &mut self,
        fb: &mut Framebuffer<W, P>,
        device: &mut D,
    ) -> Result<usize, D::Error>
    where
        D: PageDevice,
    {
        let dirty = fb.take_dirty_rect();
        if dirty.is_empty() {
            return Ok(0);
        }

        let (left, right) = (dirty.top_left.x as usize, dirty.bottom_right.x as usize);
        let (first_page, last_page) = (dirty.top_left.y as usize >> 3, dirty.bottom_right.y as usize >> 3);

        let mut sent = 0;
        for (page, row) in fb.pages().iter().enumerate().take(last_page + 1).skip(first_page) {
            let span = &row[left..=right];
            device.write_page_row(page, left, span)?;
            sent += span.len();
            self.stats.page_rows = self.stats.page_rows.saturating_add(1);
        }

        self.stats.flushes = self.stats.flushes.saturating_add(1);
        self.stats.bytes = self.stats.bytes.saturating_add(u32::try_from(sent).unwrap_or(u32::MAX));
        trace!(
            "flush: cols {}..={} pages {}..={} ({} bytes)",
            left,
            right,
            first_page,
            last_page,
            sent
        );
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::testing::{Call, MockDevice, MockError};

    fn blank<const W: usize, const P: usize>() -> Framebuffer<W, P> {
        let mut fb = Framebuffer::new();
        fb.take_dirty_rect();
        fb
    }

    #[test]
    fn test_clean_buffer_sends_nothing() {
        let mut fb = blank::<16, 2>();
        let mut device = MockDevice::default();
        let mut driver = RepaintDriver::new();

        assert_eq!(driver.flush(&mut fb, &mut device), Ok(0));
        assert!(device.calls.is_empty());
        assert_eq!(driver.stats(), RepaintStats::default());
    }

    #[test]
    fn test_new_buffer_sends_everything() {
        let mut fb = Framebuffer::<16, 2>::new();
        let mut device = MockDevice::default();
        let mut driver = RepaintDriver::new();

        assert_eq!(driver.flush(&mut fb, &mut device), Ok(32));
        assert_eq!(
            &device.calls[..],
            &[Call::Cursor(0, 0), Call::Write(16), Call::Cursor(0, 1), Call::Write(16)]
        );
    }

    #[test]
    fn test_partial_rect_spans_pages() {
        let mut fb = blank::<32, 4>();
        fb.draw_v_line(9, 6, 17, false);
        fb.draw_h_line(5, 12, 10, false);
        let mut device = MockDevice::default();
        let mut driver = RepaintDriver::new();

        // Dirty area (5, 6)..=(12, 17) covers pages 0..=2
        assert_eq!(driver.flush(&mut fb, &mut device), Ok(24));
        assert_eq!(
            &device.calls[..],
            &[
                Call::Cursor(5, 0),
                Call::Write(8),
                Call::Cursor(5, 1),
                Call::Write(8),
                Call::Cursor(5, 2),
                Call::Write(8),
            ]
        );
        // Column 9 of each page, offset 4 in each burst
        assert_eq!(device.data[4], 0b1100_0000);
        assert_eq!(device.data[8 + 4], 0xFF);
        assert_eq!(device.data[16 + 4], 0b0000_0011);
        // Column 5, page 1: only the horizontal line at row 10
        assert_eq!(device.data[8], 0b0000_0100);

        assert!(fb.dirty_rect().is_empty());
        assert_eq!(
            driver.stats(),
            RepaintStats {
                flushes: 1,
                page_rows: 3,
                bytes: 24
            }
        );
    }

    #[test]
    fn test_second_flush_is_empty() {
        let mut fb = blank::<16, 1>();
        fb.set_pixel(3, 3, true);
        let mut device = MockDevice::default();
        let mut driver = RepaintDriver::new();

        assert_eq!(driver.flush(&mut fb, &mut device), Ok(1));
        assert_eq!(driver.flush(&mut fb, &mut device), Ok(0));
        assert_eq!(device.calls.len(), 2);
        assert_eq!(&device.data[..], &[0b0000_1000]);
    }

    #[test]
    fn test_error_propagates_and_drains() {
        let mut fb = Framebuffer::<8, 2>::new();
        let mut device = MockDevice::failing_at(1);
        let mut driver = RepaintDriver::new();

        assert_eq!(driver.flush(&mut fb, &mut device), Err(MockError));
        assert_eq!(device.calls.len(), 3);
        assert!(fb.dirty_rect().is_empty());
        assert_eq!(driver.stats().flushes, 0);

        fb.invalidate_all();
        let mut device = MockDevice::default();
        assert_eq!(driver.flush(&mut fb, &mut device), Ok(16));
    }

    #[test]
    fn test_counters_saturate() {
        let mut fb = Framebuffer::<8, 1>::new();
        let mut device = MockDevice::default();
        let mut driver = RepaintDriver::new();
        driver.stats = RepaintStats {
            flushes: u32::MAX,
            page_rows: u32::MAX,
            bytes: u32::MAX - 2,
        };

        assert_eq!(driver.flush(&mut fb, &mut device), Ok(8));
        assert_eq!(
            driver.stats(),
            RepaintStats {
                flushes: u32::MAX,
                page_rows: u32::MAX,
                bytes: u32::MAX
            }
        );
    }

    #[test]
    fn test_manual_invalidate_resends_region() {
        let mut fb = blank::<16, 2>();
        fb.invalidate(Rect::from_corners(14, 9, 20, 9));
        let mut device = MockDevice::default();

        assert_eq!(RepaintDriver::new().flush(&mut fb, &mut device), Ok(2));
        assert_eq!(&device.calls[..], &[Call::Cursor(14, 1), Call::Write(2)]);
    }
}
