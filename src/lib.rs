//! Frame buffer graphics for PCD8544-class dot-matrix LCDs
//!
//! The [`pcd8544`] module drives the panel: lifecycle, initialization and streaming the
//! frame over a byte [`Transport`]. The [`graphics`] module holds the packed frame buffer,
//! the line, rectangle and circle rasterizers and the 5x7 text renderer.
//!
//! ```no_run
//! use dotmatrix::{DisplayConfig, Pcd8544, PinConfig, Transport};
//! # fn demo<T: Transport>(transport: T) -> Result<(), dotmatrix::Error> {
//! let mut display = Pcd8544::new(DisplayConfig::default())?;
//! display.bind_transport(PinConfig::default(), transport)?;
//! display.initialize()?;
//! display.draw_string("Hello", 1, 0, 0)?;
//! display.draw_circle(60, 24, 10, true)?;
//! display.flush()?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]
#![allow(clippy::pedantic)]

extern crate alloc;

pub mod graphics;
pub mod pcd8544;

pub use graphics::font::{Font, FONT_5X7};
pub use graphics::framebuffer::FrameBuffer;
pub use pcd8544::config::{Bias, DisplayConfig, DisplayMode, TemperatureCoefficient};
pub use pcd8544::driver::{DeviceStatus, Pcd8544};
pub use pcd8544::error::Error;
pub use pcd8544::interface::{BitBangInterface, NoPin, SpiInterface, Transport};
pub use pcd8544::pins::{PinConfig, Pins};
