/// Command opcodes of the PCD8544 controller.
///
/// The low bits of most opcodes carry an argument, see [`crate::pcd8544::flag::Flag`].
pub struct Cmd;
impl Cmd {
    // Available in both instruction sets
    pub const FUNCTION_SET: u8 = 0x20;

    // Basic instruction set (H = 0)
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const SET_Y_ADDRESS: u8 = 0x40;
    pub const SET_X_ADDRESS: u8 = 0x80;

    // Extended instruction set (H = 1)
    pub const TEMP_CONTROL: u8 = 0x04;
    pub const BIAS_SYSTEM: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}

/*
Datasheet instruction table:
0x20 | PD<<2 | V<<1 | H - Function set
0x08 | D<<2 | E      - Display control (H = 0)
0x40 | Y             - Set Y address of RAM, bank 0..5 (H = 0)
0x80 | X             - Set X address of RAM, column 0..83 (H = 0)
0x04 | TC            - Temperature control (H = 1)
0x10 | BS            - Bias system (H = 1)
0x80 | VOP           - Set operating voltage (H = 1)
*/
