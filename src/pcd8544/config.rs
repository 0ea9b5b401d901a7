//! Panel geometry and the analog settings written during initialization

use crate::pcd8544::error::Error;
use crate::pcd8544::flag::Flag;
use crate::pcd8544::{HEIGHT, MAX_HEIGHT, MAX_WIDTH, WIDTH};

/// Temperature coefficient of the LCD supply voltage
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureCoefficient {
    TC0 = 0,
    TC1 = 1,
    TC2 = 2,
    TC3 = 3,
}

/// Bias system, picked to match the multiplex rate of the panel
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bias1To100 = 0,
    Bias1To80 = 1,
    Bias1To65 = 2,
    Bias1To48 = 3,
    Bias1To40 = 4,
    Bias1To24 = 5,
    Bias1To18 = 6,
    Bias1To10 = 7,
}

/// What the panel shows regardless of RAM content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Blank,
    Normal,
    AllSegmentsOn,
    InverseVideo,
}

impl DisplayMode {
    pub(crate) fn bits(self) -> u8 {
        match self {
            DisplayMode::Blank => Flag::DISPLAY_BLANK,
            DisplayMode::Normal => Flag::DISPLAY_NORMAL,
            DisplayMode::AllSegmentsOn => Flag::DISPLAY_ALL_SEGMENTS_ON,
            DisplayMode::InverseVideo => Flag::DISPLAY_INVERSE_VIDEO,
        }
    }
}

/// Construction-time configuration of [`Pcd8544`](crate::pcd8544::driver::Pcd8544).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Pixels horizontally
    pub width: u16,
    /// Pixels vertically, need not be a multiple of 8
    pub height: u16,
    /// Operating voltage, `0..=127`
    pub contrast: u8,
    pub bias: Bias,
    pub temperature: TemperatureCoefficient,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: WIDTH,
            height: HEIGHT,
            contrast: Flag::VOP_DEFAULT,
            bias: Bias::Bias1To40,
            temperature: TemperatureCoefficient::TC3,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            log::warn!("Display size {}x{} is empty", self.width, self.height);
            return Err(Error::InvalidConfig);
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            log::warn!(
                "Display size {}x{} exceeds the {}x{} controller RAM",
                self.width,
                self.height,
                MAX_WIDTH,
                MAX_HEIGHT
            );
            return Err(Error::InvalidConfig);
        }
        if self.contrast > Flag::VOP_MAX {
            log::warn!("Contrast {} exceeds {}", self.contrast, Flag::VOP_MAX);
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_panel() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (84, 48));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn empty_geometry_is_rejected() {
        let config = DisplayConfig {
            height: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn geometry_beyond_controller_ram_is_rejected() {
        for (width, height) in [(85, 48), (84, 49), (200, 100)] {
            let config = DisplayConfig {
                width,
                height,
                ..DisplayConfig::default()
            };
            assert_eq!(config.validate(), Err(Error::InvalidConfig), "{}x{}", width, height);
        }
    }

    #[test]
    fn smaller_panels_fit() {
        let config = DisplayConfig {
            width: 48,
            height: 36,
            ..DisplayConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn contrast_above_seven_bits_is_rejected() {
        let config = DisplayConfig {
            contrast: 0x80,
            ..DisplayConfig::default()
        };
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn display_mode_bits() {
        assert_eq!(DisplayMode::Normal.bits(), 0b100);
        assert_eq!(DisplayMode::InverseVideo.bits(), 0b101);
    }
}
