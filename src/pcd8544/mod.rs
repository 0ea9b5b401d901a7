//! PCD8544 dot-matrix LCD controller
//!
//! Used in the Nokia 5110/3310 84x48 monochrome panels.
//!
//! This driver keeps a software copy of the display RAM. To display something you:
//!
//! 1. create a [`driver::Pcd8544`] and bind a [`interface::Transport`] to it
//! 1. call [`driver::Pcd8544::initialize`]
//! 1. draw lines, rectangles, circles and text into the buffer
//! 1. push the buffer to the panel with [`driver::Pcd8544::flush`]
//!
//! [`driver::Pcd8544::clear`] is the exception: it blanks the panel right away.
//!
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod config;
pub mod driver;
pub mod error;
pub mod flag;
pub mod interface;
pub mod pins;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 48;

/// Display width, pixels horizontally
pub const WIDTH: u16 = 84;

/// Largest geometry the display RAM can hold: 84 columns, 6 banks of 8 rows
pub const MAX_HEIGHT: u16 = 48;
pub const MAX_WIDTH: u16 = 84;
