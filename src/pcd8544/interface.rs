//! Byte transports between the controller and the panel
//!
//! [`Pcd8544`](crate::pcd8544::driver::Pcd8544) only ever talks to a [`Transport`]. Two
//! implementations ship with the crate: [`SpiInterface`] for a hardware SPI peripheral and
//! [`BitBangInterface`] for five plain GPIO lines.
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

const RESET_PULSE_MS: u32 = 1;
const RESET_SETTLE_MS: u32 = 10;

/// Synchronous byte link to the display controller
pub trait Transport {
    /// Send one byte, tagged as display data (`true`) or as a command (`false`).
    fn send_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError>;

    /// Send a run of display data. Stops at the first failed byte.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        for &byte in data {
            self.send_byte(byte, true)?;
        }
        Ok(())
    }

    /// Pulse the hardware reset line. Transports without one do nothing.
    fn reset(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        (**self).send_byte(value, is_data)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        (**self).send_data(data)
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        (**self).reset()
    }
}

/// Placeholder for a line that is not wired, e.g. a reset pin tied high.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Transport over a hardware SPI device, the chip select is owned by `SPI`.
pub struct SpiInterface<SPI, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: Option<RST>,
    delay: DELAY,
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY> {
    pub fn new(spi: SPI, dc: DC, rst: Option<RST>, delay: DELAY) -> Self {
        SpiInterface {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, Option<RST>, DELAY) {
        (self.spi, self.dc, self.rst, self.delay)
    }
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn select(&mut self, is_data: bool) -> Result<(), DisplayError> {
        // high for data, low for commands
        if is_data {
            self.dc.set_high().map_err(|_| DisplayError::DCError)
        } else {
            self.dc.set_low().map_err(|_| DisplayError::DCError)
        }
    }
}

impl<SPI, DC, RST, DELAY> Transport for SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn send_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        self.select(is_data)?;
        match self.spi.write(&[value]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for byte 0x{:02X}: {:?}", value, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.select(true)?;
        self.spi.write(data).map_err(|e| {
            log::error!("SPI write error for {} data bytes: {:?}", data.len(), e);
            DisplayError::BusWriteError
        })
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}

/// Transport clocking bytes out MSB first over plain output pins.
pub struct BitBangInterface<CS, CLK, DIN, DC, RST, DELAY> {
    cs: CS,
    clk: CLK,
    din: DIN,
    dc: DC,
    rst: Option<RST>,
    delay: DELAY,
}

impl<CS, CLK, DIN, DC, RST, DELAY> BitBangInterface<CS, CLK, DIN, DC, RST, DELAY>
where
    CS: OutputPin,
    CLK: OutputPin,
    DIN: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Take the pins and park the bus: clock low, chip deselected.
    pub fn new(
        mut cs: CS,
        mut clk: CLK,
        din: DIN,
        dc: DC,
        rst: Option<RST>,
        delay: DELAY,
    ) -> Result<Self, DisplayError> {
        clk.set_low().map_err(|_| DisplayError::BusWriteError)?;
        cs.set_high().map_err(|_| DisplayError::CSError)?;
        Ok(BitBangInterface {
            cs,
            clk,
            din,
            dc,
            rst,
            delay,
        })
    }

    fn write_bit(&mut self, high: bool) -> Result<(), DisplayError> {
        let level = if high {
            self.din.set_high()
        } else {
            self.din.set_low()
        };
        level.map_err(|_| DisplayError::BusWriteError)?;
        self.clk.set_high().map_err(|_| DisplayError::BusWriteError)?;
        self.clk.set_low().map_err(|_| DisplayError::BusWriteError)
    }
}

impl<CS, CLK, DIN, DC, RST, DELAY> Transport for BitBangInterface<CS, CLK, DIN, DC, RST, DELAY>
where
    CS: OutputPin,
    CLK: OutputPin,
    DIN: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn send_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        let dc = if is_data {
            self.dc.set_high()
        } else {
            self.dc.set_low()
        };
        dc.map_err(|_| DisplayError::DCError)?;

        self.cs.set_low().map_err(|_| DisplayError::CSError)?;
        let mut value = value;
        for _ in 0..8 {
            if let Err(e) = self.write_bit(value & 0x80 == 0x80) {
                // leave the chip deselected so the next byte starts clean
                let _ = self.cs.set_high();
                return Err(e);
            }
            value <<= 1;
        }
        self.cs.set_high().map_err(|_| DisplayError::CSError)
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}
