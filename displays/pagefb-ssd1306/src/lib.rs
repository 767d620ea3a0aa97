//! SSD1306 / SH1106 OLED controller driver
//!
//! Drives 128-column page-addressed OLED controllers over any
//! [`DisplayPort`](pagefb_hal::DisplayPort) and exposes them as a
//! [`PageDevice`](pagefb_core::PageDevice) so the repaint driver can
//! stream dirty page rows into display RAM.
//!
//! The SH1106 is command compatible for page addressing but maps its 128
//! visible columns into a 132 column RAM, hence the configurable column
//! offset.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod driver;

pub use config::DisplayConfig;
pub use driver::{DisplayError, Ssd1306};
