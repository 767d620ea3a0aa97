//! Monochrome page-addressed framebuffer with bitmap text and partial repaint
//!
//! This crate holds everything that does not depend on a particular display
//! controller:
//!
//! - Page-packed 1bpp framebuffer with dirty rectangle tracking
//! - Packed bitmap font tables and the tooling to build them
//! - Fixed-width text rendering with bold and erase-behind
//! - Repaint driver that sends only the dirty page rows
//! - [`PageDevice`] trait implemented by controller drivers
//!
//! # Example
//!
//! ```ignore
//! static FONT: &[u8] = include_bytes!("font6x8.bin");
//!
//! let mut screen = Screen::<128, 8>::new(GlyphTable::load(FONT)?);
//! screen.text(0, 0, "Ready", true)?;
//! screen.hline(0, 127, 9, false);
//! screen.flush(&mut display)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod repaint;
pub mod screen;
pub mod text;
pub mod traits;

#[cfg(feature = "graphics")]
mod graphics;

#[cfg(test)]
mod testing;

pub use font::{FontError, Glyph, GlyphTable};
pub use framebuffer::{Framebuffer, Framebuffer128x32, Framebuffer128x64};
pub use geometry::{Point, Rect};
pub use repaint::{RepaintDriver, RepaintStats};
pub use screen::Screen;
pub use text::TextRenderer;
pub use traits::{PageDevice, PageDeviceExt};
