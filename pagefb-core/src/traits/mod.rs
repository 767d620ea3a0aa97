//! Device abstraction traits
//!
//! These traits sit between the framebuffer logic and the controller
//! drivers that move bytes into display RAM.

pub mod device;

pub use device::{PageDevice, PageDeviceExt};
