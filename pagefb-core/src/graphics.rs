//! embedded-graphics support
//!
//! Lets `embedded-graphics` primitives, images and fonts render into a
//! [`Framebuffer`]. Pixels go through the same clipping and dirty tracking
//! as the native drawing calls, so a following flush picks them up.

use core::convert::Infallible;

use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::prelude::*;
use embedded_graphics_core::primitives::Rectangle;

use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

impl<const W: usize, const P: usize> DrawTarget for Framebuffer<W, P> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let rect = Rect::with_size(area.top_left.x, area.top_left.y, area.size.width, area.size.height);
        self.fill_rect(rect, color.is_on());
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Framebuffer::clear(self, color.is_on());
        Ok(())
    }
}

impl<const W: usize, const P: usize> OriginDimensions for Framebuffer<W, P> {
    fn size(&self) -> Size {
        Size::new(W as u32, (P * 8) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_iter_tracks_dirty() {
        let mut fb = Framebuffer::<16, 2>::new();
        fb.take_dirty_rect();

        let pixels = [
            Pixel(Point::new(2, 9), BinaryColor::On),
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(5, 3), BinaryColor::On),
        ];
        fb.draw_iter(pixels).unwrap();

        assert!(fb.pixel(2, 9));
        assert!(fb.pixel(5, 3));
        assert_eq!(fb.dirty_rect(), Rect::from_corners(2, 3, 5, 9));
    }

    #[test]
    fn test_fill_solid_and_size() {
        let mut fb = Framebuffer::<16, 2>::new();
        assert_eq!(fb.size(), Size::new(16, 16));

        DrawTarget::clear(&mut fb, BinaryColor::Off).unwrap();
        fb.take_dirty_rect();
        fb.fill_solid(&Rectangle::new(Point::new(14, 6), Size::new(8, 4)), BinaryColor::On)
            .unwrap();

        assert_eq!(fb.page(0).unwrap()[14], 0b1100_0000);
        assert_eq!(fb.page(1).unwrap()[15], 0b0000_0011);
        assert_eq!(fb.dirty_rect(), Rect::from_corners(14, 6, 15, 9));
    }

    #[test]
    fn test_fill_solid_huge_area_is_clipped() {
        let mut fb = Framebuffer::<8, 1>::new();
        DrawTarget::clear(&mut fb, BinaryColor::Off).unwrap();
        fb.take_dirty_rect();

        fb.fill_solid(&Rectangle::new(Point::new(0, 2), Size::new(u32::MAX, 1)), BinaryColor::On)
            .unwrap();

        assert!(fb.as_bytes().iter().all(|&b| b == 0b0000_0100));
        assert_eq!(fb.dirty_rect(), Rect::from_corners(0, 2, 7, 2));
    }
}
