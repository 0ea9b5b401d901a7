//! Packed monochrome frame buffer
//!
//! Memory layout follows the controller RAM: each byte holds 8 vertically stacked pixels,
//! bit 0 on top. Bytes run left to right through one 8-row bank, then on to the next bank.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::pcd8544::error::Error;

/// Fixed-size bitmap mirroring the panel RAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    bytes: Vec<u8>,
}

/// Bytes needed for a `width` x `height` bitmap
pub const fn buffer_len(width: u16, height: u16) -> usize {
    (height as usize).div_ceil(8) * width as usize
}

impl FrameBuffer {
    /// Reserve a zeroed buffer. The size never changes afterwards.
    pub fn new(width: u16, height: u16) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig);
        }
        let len = buffer_len(width, height);
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len).map_err(|_| {
            log::error!("Could not reserve {} bytes for a {}x{} frame", len, width, height);
            Error::BufferAllocationFailed
        })?;
        bytes.resize(len, 0);
        Ok(FrameBuffer {
            width,
            height,
            bytes,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw bytes in transfer order
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether `(x, y)` addresses a pixel of this buffer
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// The only place pixel coordinates turn into a byte index and bit mask.
    fn locate(&self, x: i32, y: i32) -> Result<(usize, u8), Error> {
        if !self.contains(x, y) {
            return Err(Error::InvalidArgument);
        }
        let (x, y) = (x as usize, y as usize);
        Ok(((y >> 3) * self.width as usize + x, 1 << (y & 7)))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Error> {
        let (index, mask) = self.locate(x, y)?;
        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
        Ok(())
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Result<bool, Error> {
        let (index, mask) = self.locate(x, y)?;
        Ok(self.bytes[index] & mask != 0)
    }

    /// Set every pixel on or off
    pub fn fill(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Number of pixels that are on, rows past `height` in the last bank are not counted.
    pub fn lit_pixels(&self) -> usize {
        let mut count = 0;
        for y in 0..i32::from(self.height) {
            for x in 0..i32::from(self.width) {
                if self.get_pixel(x, y) == Ok(true) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

/// For use with embedded_graphics, pixels outside the buffer are dropped.
impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let _ = self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.is_on());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn size_rounds_up_to_whole_banks() {
        assert_eq!(buffer_len(84, 48), 504);
        assert_eq!(buffer_len(10, 9), 20);
        assert_eq!(FrameBuffer::new(84, 48).unwrap().bytes().len(), 504);
    }

    #[test]
    fn new_buffer_is_blank() {
        let buffer = FrameBuffer::new(84, 48).unwrap();
        assert!(buffer.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(FrameBuffer::new(0, 48), Err(Error::InvalidConfig));
    }

    #[test]
    fn pixel_round_trip() {
        let mut buffer = FrameBuffer::new(84, 48).unwrap();
        for (x, y) in [(0, 0), (83, 47), (17, 9), (40, 23)] {
            buffer.set_pixel(x, y, true).unwrap();
            assert_eq!(buffer.get_pixel(x, y), Ok(true));
            buffer.set_pixel(x, y, false).unwrap();
            assert_eq!(buffer.get_pixel(x, y), Ok(false));
        }
        assert_eq!(buffer.lit_pixels(), 0);
    }

    #[test]
    fn bit_layout_is_vertical_bytes() {
        let mut buffer = FrameBuffer::new(84, 48).unwrap();
        buffer.set_pixel(3, 0, true).unwrap();
        buffer.set_pixel(3, 7, true).unwrap();
        buffer.set_pixel(5, 10, true).unwrap();

        assert_eq!(buffer.bytes()[3], 0b1000_0001);
        assert_eq!(buffer.bytes()[84 + 5], 0b0000_0100);
    }

    #[test]
    fn out_of_range_is_rejected_without_touching_neighbours() {
        let mut buffer = FrameBuffer::new(84, 48).unwrap();
        assert_eq!(buffer.set_pixel(84, 0, true), Err(Error::InvalidArgument));
        assert_eq!(buffer.set_pixel(0, 48, true), Err(Error::InvalidArgument));
        assert_eq!(buffer.set_pixel(-1, 3, true), Err(Error::InvalidArgument));
        assert_eq!(buffer.get_pixel(0, -1), Err(Error::InvalidArgument));
        assert!(buffer.bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn partial_last_bank() {
        let mut buffer = FrameBuffer::new(4, 10).unwrap();
        buffer.set_pixel(0, 9, true).unwrap();
        assert_eq!(buffer.set_pixel(0, 10, true), Err(Error::InvalidArgument));
        assert_eq!(buffer.bytes()[4], 0b10);
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut buffer = FrameBuffer::new(8, 8).unwrap();
        buffer.fill(true);
        assert_eq!(buffer.lit_pixels(), 64);
        buffer.fill(false);
        assert_eq!(buffer.lit_pixels(), 0);
    }

    #[test]
    fn draws_embedded_graphics_primitives_clipped() {
        let mut buffer = FrameBuffer::new(84, 48).unwrap();
        Line::new(Point::new(80, 0), Point::new(90, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut buffer)
            .unwrap();

        assert_eq!(buffer.lit_pixels(), 4);
        assert_eq!(buffer.get_pixel(83, 0), Ok(true));
        assert_eq!(buffer.size(), Size::new(84, 48));
    }
}
