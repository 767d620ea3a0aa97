//! pagefb transport layer
//!
//! This crate binds controller drivers to `embedded-hal` buses through the
//! [`DisplayPort`] capability, which separates controller commands from
//! pixel data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pagefb-core (framebuffer, text, flush) │
//! └─────────────────────────────────────────┘
//!                     │ PageDevice
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pagefb-ssd1306 (controller commands)   │
//! └─────────────────────────────────────────┘
//!                     │ DisplayPort
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    SpiPort    │       │    I2cPort    │
//! │ (DC + RESET)  │       │ (ctrl byte)   │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!   SpiDevice + OutputPin        I2c        (embedded-hal 1.0)
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod i2c;
pub mod port;

pub use i2c::I2cPort;
pub use port::{DisplayPort, PortError, SpiPort, SPI_FREQUENCY_HZ, SPI_MODE};
