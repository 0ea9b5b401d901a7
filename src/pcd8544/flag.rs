/// Argument bits and limits that are OR-ed into the [`crate::pcd8544::cmd::Cmd`] opcodes.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Function set (0x20) flags
    pub const FUNCTION_POWER_DOWN: u8 = 0x04;
    pub const FUNCTION_EXTENDED_INSTRUCTIONS: u8 = 0x01;

    // Display control (0x08) flags
    pub const DISPLAY_BLANK: u8 = 0b000;
    pub const DISPLAY_NORMAL: u8 = 0b100;
    pub const DISPLAY_ALL_SEGMENTS_ON: u8 = 0b001;
    pub const DISPLAY_INVERSE_VIDEO: u8 = 0b101;

    // SET_VOP (0x80) accepts 7 bits
    pub const VOP_MAX: u8 = 0x7F;
    pub const VOP_DEFAULT: u8 = 0x38;

    // Temperature control (0x04) and bias (0x10) argument masks
    pub const TEMP_COEFFICIENT_MASK: u8 = 0x03;
    pub const BIAS_MASK: u8 = 0x07;
}
