//! PCD8544 Display Driver Implementation
//!
//! This module contains the controller that owns the frame buffer and the transport.
//!
//! ## Lifecycle
//!
//! `Uninitialized -> bind_transport -> PortsBound -> initialize -> Initialized`
//!
//! Binding a transport again drops back to `PortsBound`. Every operation that draws,
//! moves the cursor or talks to the panel needs `Initialized` and fails with
//! [`Error::NotInitialized`] before that, leaving the buffer alone.
//!
//! ## Error reporting
//!
//! Each public operation returns its result and also stores it in
//! [`Pcd8544::last_error`], which is cleared by the next successful call.
//!
//! ## Frame transfer
//!
//! [`Pcd8544::flush`] moves the RAM address counter to column 0, bank 0 and streams the
//! whole buffer as data. The controller auto-increments X and wraps into the next bank,
//! which is exactly the buffer's byte order.

pub use display_interface::DisplayError;

use crate::graphics::font::{Font, FONT_5X7};
use crate::graphics::framebuffer::FrameBuffer;
use crate::graphics::raster;
use crate::graphics::text::{self, Cursor};
use crate::pcd8544::config::{DisplayConfig, DisplayMode};
use crate::pcd8544::error::Error;
use crate::pcd8544::interface::Transport;
use crate::pcd8544::pins::PinConfig;
use crate::pcd8544::{cmd::Cmd, flag::Flag};

/// Where the controller is in its bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Uninitialized,
    PortsBound,
    Initialized,
}

/// PCD8544 display controller with a software frame buffer
///
/// ## Type Parameters
///
/// - `T` - byte transport to the panel, see [`crate::pcd8544::interface`]
pub struct Pcd8544<T> {
    config: DisplayConfig,
    font: &'static Font,
    buffer: FrameBuffer,
    cursor: Cursor,
    transport: Option<T>,
    pins: Option<PinConfig>,
    status: DeviceStatus,
    last_error: Option<Error>,
    power_down: bool,
}

impl<T: Transport> Pcd8544<T> {
    /// Allocate the frame buffer for `config`, text uses [`FONT_5X7`].
    pub fn new(config: DisplayConfig) -> Result<Self, Error> {
        Self::with_font(config, &FONT_5X7)
    }

    /// Same as [`Pcd8544::new`] with a custom glyph table.
    pub fn with_font(config: DisplayConfig, font: &'static Font) -> Result<Self, Error> {
        config.validate()?;
        font.validate().map_err(|_| Error::InvalidConfig)?;
        let buffer = FrameBuffer::new(config.width, config.height)?;
        log::info!(
            "Frame buffer of {} bytes for a {}x{} panel",
            buffer.bytes().len(),
            config.width,
            config.height
        );

        Ok(Pcd8544 {
            config,
            font,
            buffer,
            cursor: Cursor::default(),
            transport: None,
            pins: None,
            status: DeviceStatus::Uninitialized,
            last_error: None,
            power_down: false,
        })
    }

    // ==================== State and accessors ====================

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Outcome of the most recent operation, `None` when it succeeded
    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Read-only view of the software frame buffer
    pub fn frame(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn pins(&self) -> Option<&PinConfig> {
        self.pins.as_ref()
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    /// Current text cursor as `(x, y)`
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor.x, self.cursor.y)
    }

    fn record<R>(&mut self, result: Result<R, Error>) -> Result<R, Error> {
        self.last_error = result.as_ref().err().copied();
        result
    }

    fn ensure_initialized(&self) -> Result<(), Error> {
        if self.status == DeviceStatus::Initialized {
            Ok(())
        } else {
            log::warn!("Display used while {:?}", self.status);
            Err(Error::NotInitialized)
        }
    }

    fn with_buffer<R>(
        &mut self,
        draw: impl FnOnce(&mut FrameBuffer) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let result = self.ensure_initialized().and_then(|()| draw(&mut self.buffer));
        self.record(result)
    }

    // ==================== Transport binding and init ====================

    /// Attach the transport described by `pins`.
    ///
    /// A malformed description is rejected with [`Error::InvalidConfig`] and the previous
    /// binding, if any, stays in place.
    pub fn bind_transport(&mut self, pins: PinConfig, transport: T) -> Result<(), Error> {
        let result = pins.validate().map(|()| {
            log::info!("Binding transport: {:?}", pins);
            self.transport = Some(transport);
            self.pins = Some(pins);
            self.status = DeviceStatus::PortsBound;
        });
        self.record(result)
    }

    /// Detach and return the transport, the controller goes back to `Uninitialized`.
    pub fn release(&mut self) -> Option<T> {
        self.pins = None;
        self.status = DeviceStatus::Uninitialized;
        self.transport.take()
    }

    /// Reset the controller and load the configured bias, temperature coefficient and
    /// contrast, then switch to normal display mode.
    pub fn initialize(&mut self) -> Result<(), Error> {
        let result = self.init_sequence();
        match result {
            Ok(()) => {
                self.status = DeviceStatus::Initialized;
                log::info!("Display initialized");
            }
            // the panel state is unknown after a half-sent sequence
            Err(Error::TransportFailure) => self.status = DeviceStatus::PortsBound,
            Err(_) => {}
        }
        self.record(result)
    }

    fn init_sequence(&mut self) -> Result<(), Error> {
        if self.transport.is_none() {
            log::warn!("Initialize called without a bound transport");
            return Err(Error::TransportNotBound);
        }
        log::info!("Initializing PCD8544 display");

        if self.pins.and_then(|pins| pins.reset).is_some() {
            self.hardware_reset()?;
        }
        self.power_down = false;

        self.function_set(true)?;
        self.command(Cmd::SET_VOP | (self.config.contrast & Flag::VOP_MAX))?;
        self.command(Cmd::TEMP_CONTROL | (self.config.temperature as u8 & Flag::TEMP_COEFFICIENT_MASK))?;
        self.command(Cmd::BIAS_SYSTEM | (self.config.bias as u8 & Flag::BIAS_MASK))?;
        self.function_set(false)?;
        self.command(Cmd::DISPLAY_CONTROL | DisplayMode::Normal.bits())
    }

    // ==================== Transport helpers ====================

    fn transport_mut(&mut self) -> Result<&mut T, Error> {
        self.transport.as_mut().ok_or(Error::TransportNotBound)
    }

    fn hardware_reset(&mut self) -> Result<(), Error> {
        self.transport_mut()?.reset().map_err(|e| {
            log::error!("Hardware reset failed: {:?}", e);
            Error::TransportFailure
        })
    }

    /// Send a command byte
    fn command(&mut self, value: u8) -> Result<(), Error> {
        self.transport_mut()?.send_byte(value, false).map_err(|e| {
            log::error!("Command 0x{:02X} failed: {:?}", value, e);
            Error::TransportFailure
        })
    }

    /// Function set with the current power state, selecting the instruction set
    fn function_set(&mut self, extended: bool) -> Result<(), Error> {
        let mut value = Cmd::FUNCTION_SET;
        if self.power_down {
            value |= Flag::FUNCTION_POWER_DOWN;
        }
        if extended {
            value |= Flag::FUNCTION_EXTENDED_INSTRUCTIONS;
        }
        self.command(value)
    }

    /// Point the RAM address counter at the origin and send the whole buffer.
    fn stream_frame(&mut self) -> Result<(), Error> {
        // column 0, bank 0
        self.command(Cmd::SET_X_ADDRESS)?;
        self.command(Cmd::SET_Y_ADDRESS)?;

        let bytes = self.buffer.bytes();
        log::debug!("Streaming {} bytes of frame data", bytes.len());
        let transport = self.transport.as_mut().ok_or(Error::TransportNotBound)?;
        transport.send_data(bytes).map_err(|e| {
            log::error!("Frame transfer failed: {:?}", e);
            Error::TransportFailure
        })
    }

    // ==================== Panel operations ====================

    /// Push the frame buffer to the panel
    pub fn flush(&mut self) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| self.stream_frame());
        self.record(result)
    }

    /// Blank the buffer, home the cursor and repaint the panel immediately.
    ///
    /// If the repaint fails the buffer and cursor are still cleared.
    pub fn clear(&mut self) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| {
            self.buffer.fill(false);
            self.cursor = Cursor::default();
            self.stream_frame()
        });
        self.record(result)
    }

    /// Set the operating voltage, `0..=127`
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| {
            if contrast > Flag::VOP_MAX {
                return Err(Error::InvalidArgument);
            }
            self.function_set(true)?;
            self.command(Cmd::SET_VOP | contrast)?;
            self.function_set(false)?;
            self.config.contrast = contrast;
            Ok(())
        });
        self.record(result)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error> {
        let result = self
            .ensure_initialized()
            .and_then(|()| self.command(Cmd::DISPLAY_CONTROL | mode.bits()));
        self.record(result)
    }

    /// Enter power-down. The panel RAM is kept but nothing is shown.
    pub fn sleep(&mut self) -> Result<(), Error> {
        self.set_power_down(true)
    }

    /// Leave power-down
    pub fn wake(&mut self) -> Result<(), Error> {
        self.set_power_down(false)
    }

    pub fn is_sleeping(&self) -> bool {
        self.power_down
    }

    fn set_power_down(&mut self, power_down: bool) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| {
            let previous = self.power_down;
            self.power_down = power_down;
            self.function_set(false).inspect_err(|_| self.power_down = previous)
        });
        self.record(result)
    }

    // ==================== Drawing ====================

    /// Direct access to the frame buffer as an `embedded_graphics` draw target
    pub fn canvas(&mut self) -> Result<&mut FrameBuffer, Error> {
        let result = self.ensure_initialized();
        self.record(result)?;
        Ok(&mut self.buffer)
    }

    /// Set every pixel on or off without touching the panel
    pub fn fill(&mut self, on: bool) -> Result<(), Error> {
        self.with_buffer(|buffer| {
            buffer.fill(on);
            Ok(())
        })
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Error> {
        self.with_buffer(|buffer| buffer.set_pixel(x, y, on))
    }

    pub fn get_pixel(&mut self, x: i32, y: i32) -> Result<bool, Error> {
        self.with_buffer(|buffer| buffer.get_pixel(x, y))
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) -> Result<(), Error> {
        self.with_buffer(|buffer| raster::draw_line(buffer, x1, y1, x2, y2, on))
    }

    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, on: bool) -> Result<(), Error> {
        self.with_buffer(|buffer| raster::draw_rectangle(buffer, x, y, w, h, on))
    }

    pub fn draw_filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        on: bool,
    ) -> Result<(), Error> {
        self.with_buffer(|buffer| raster::draw_filled_rectangle(buffer, x, y, w, h, on))
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: u32, on: bool) -> Result<(), Error> {
        self.with_buffer(|buffer| raster::draw_circle(buffer, cx, cy, r, on))
    }

    // ==================== Text ====================

    /// Move the text cursor, rejected with [`Error::InvalidArgument`] outside the panel
    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<(), Error> {
        let result = self
            .ensure_initialized()
            .and_then(|()| self.move_cursor(x, y));
        self.record(result)
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<(), Error> {
        if x >= self.buffer.width() || y >= self.buffer.height() {
            log::warn!("Cursor ({}, {}) is off the panel", x, y);
            return Err(Error::InvalidArgument);
        }
        self.cursor = Cursor { x, y };
        Ok(())
    }

    /// Draw the glyph for `code` at the cursor and advance it
    pub fn draw_glyph(&mut self, code: u8, scale: u8) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| {
            text::draw_glyph(&mut self.buffer, self.font, &mut self.cursor, code, scale)
        });
        self.record(result)
    }

    /// Move the cursor to `(x, y)` and draw `text` from there
    pub fn draw_string(&mut self, text: &str, scale: u8, x: u16, y: u16) -> Result<(), Error> {
        let result = self.ensure_initialized().and_then(|()| {
            if scale == 0 {
                return Err(Error::InvalidArgument);
            }
            self.move_cursor(x, y)?;
            text::draw_text(&mut self.buffer, self.font, &mut self.cursor, text, scale)
        });
        self.record(result)
    }
}
