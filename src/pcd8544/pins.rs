//! Pin description for the display transport
//!
//! Lines are numbered the Arduino way: port B pins 8..13, port D pins 0..7, port C 14..19.

use crate::pcd8544::error::Error;

/// Number of digital lines a binding may refer to.
pub const LINE_COUNT: u8 = 20;

/// Default wiring constants for a Nokia 5110 breakout on an ATmega328
pub struct Pins;

impl Pins {
    /// Chip enable, active low
    pub const CS: u8 = 10;
    /// Serial clock
    pub const CLK: u8 = 13;
    /// Serial data in (MOSI)
    pub const DIN: u8 = 11;
    /// Data/Command select (High for data, Low for command)
    pub const DC: u8 = 9;
    /// Reset, active low
    pub const RST: u8 = 8;
}

/// Lines used by the transport, handed to
/// [`Pcd8544::bind_transport`](crate::pcd8544::driver::Pcd8544::bind_transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub chip_select: u8,
    pub clock: u8,
    pub data_in: u8,
    pub data_command: u8,
    /// Without a reset line the hardware reset pulse is skipped on init
    pub reset: Option<u8>,
}

impl Default for PinConfig {
    fn default() -> Self {
        PinConfig {
            chip_select: Pins::CS,
            clock: Pins::CLK,
            data_in: Pins::DIN,
            data_command: Pins::DC,
            reset: Some(Pins::RST),
        }
    }
}

impl PinConfig {
    /// Every line must exist and no two roles may share a line.
    pub fn validate(&self) -> Result<(), Error> {
        let lines = [
            Some(self.chip_select),
            Some(self.clock),
            Some(self.data_in),
            Some(self.data_command),
            self.reset,
        ];

        let mut seen: u32 = 0;
        for line in lines.into_iter().flatten() {
            if line >= LINE_COUNT {
                log::warn!("Line {} is outside the {} addressable lines", line, LINE_COUNT);
                return Err(Error::InvalidConfig);
            }
            let bit = 1u32 << line;
            if seen & bit != 0 {
                log::warn!("Line {} is assigned to more than one role", line);
                return Err(Error::InvalidConfig);
            }
            seen |= bit;
        }
        Ok(())
    }
}
