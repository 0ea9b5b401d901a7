//! Drawing into the in-memory frame buffer
//!
//! Nothing in here touches the transport. [`framebuffer::FrameBuffer`] is also an
//! `embedded_graphics` draw target, so the stock primitives and mono fonts work on it too.

pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod text;
