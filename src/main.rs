use anyhow::anyhow;
use display_interface::DisplayError;
use log::info;

use embedded_graphics::mono_font::{iso_8859_15::FONT_5X8, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{PrimitiveStyle, Triangle};
use embedded_graphics::{prelude::*, text::Text};

use dotmatrix::pcd8544::cmd::Cmd;
use dotmatrix::pcd8544::flag::Flag;
use dotmatrix::pcd8544::{HEIGHT, WIDTH};
use dotmatrix::{DisplayConfig, Pcd8544, PinConfig, Transport};

/// In-memory model of the panel RAM, fed by the same bytes a real PCD8544 would get.
struct PanelModel {
    ram: Vec<u8>,
    x: usize,
    bank: usize,
    extended: bool,
}

impl PanelModel {
    fn new() -> Self {
        PanelModel {
            ram: vec![0; usize::from(WIDTH) * usize::from(HEIGHT).div_ceil(8)],
            x: 0,
            bank: 0,
            extended: false,
        }
    }

    fn command(&mut self, value: u8) {
        if value & 0xF8 == Cmd::FUNCTION_SET {
            self.extended = value & Flag::FUNCTION_EXTENDED_INSTRUCTIONS != 0;
        } else if !self.extended && value & Cmd::SET_X_ADDRESS != 0 {
            self.x = usize::from(value & 0x7F);
        } else if !self.extended && value & 0xC0 == Cmd::SET_Y_ADDRESS {
            self.bank = usize::from(value & 0x07);
        }
    }

    fn data(&mut self, value: u8) {
        let width = usize::from(WIDTH);
        let banks = self.ram.len() / width;
        self.ram[self.bank * width + self.x] = value;
        self.x += 1;
        if self.x == width {
            self.x = 0;
            self.bank = (self.bank + 1) % banks;
        }
    }

    fn render(&self) -> String {
        let width = usize::from(WIDTH);
        let mut out = String::new();
        for y in 0..usize::from(HEIGHT) {
            for x in 0..width {
                let lit = self.ram[(y / 8) * width + x] >> (y % 8) & 1 == 1;
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Transport for PanelModel {
    fn send_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        if is_data {
            self.data(value);
        } else {
            self.command(value);
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut display = Pcd8544::new(DisplayConfig::default())
        .map_err(|e| anyhow!("Could not allocate the frame buffer: {}", e))?;

    display
        .bind_transport(PinConfig::default(), PanelModel::new())
        .map_err(|e| anyhow!("Pin configuration rejected: {}", e))?;
    display
        .initialize()
        .map_err(|e| anyhow!("Display init failed: {}", e))?;

    display.clear().map_err(|e| anyhow!("Clear failed: {}", e))?;

    info!("Drawing demo scene");
    let drawn = display
        .draw_rectangle(0, 0, u32::from(WIDTH) - 1, u32::from(HEIGHT) - 1, true)
        .and_then(|()| display.draw_string("dotmatrix", 1, 2, 2))
        .and_then(|()| display.draw_line(2, 11, 81, 11, true))
        .and_then(|()| display.draw_circle(20, 30, 12, true))
        .and_then(|()| display.draw_filled_rectangle(16, 26, 8, 8, true))
        .and_then(|()| display.draw_string("x2", 2, 40, 16));
    if let Err(e) = drawn {
        log::error!("Drawing failed: {}", e);
        return Err(anyhow!("Drawing failed: {}", e));
    }

    // embedded-graphics primitives and fonts draw straight into the same buffer
    let canvas = display
        .canvas()
        .map_err(|e| anyhow!("No canvas: {}", e))?;
    Triangle::new(Point::new(66, 44), Point::new(80, 44), Point::new(73, 32))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(canvas)?;
    Text::new("eg", Point::new(42, 42), MonoTextStyle::new(&FONT_5X8, BinaryColor::On))
        .draw(canvas)?;

    display.flush().map_err(|e| anyhow!("Flush failed: {}", e))?;
    info!("Frame pushed, cursor at {:?}", display.cursor());

    let panel = display
        .release()
        .ok_or_else(|| anyhow!("Transport went missing"))?;
    print!("{}", panel.render());

    Ok(())
}
