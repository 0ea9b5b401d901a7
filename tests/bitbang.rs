use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use dotmatrix::{BitBangInterface, DisplayConfig, Pcd8544, PinConfig};

/// Wire level model of the panel's serial input, latching DIN on every rising clock edge.
#[derive(Default)]
struct Bus {
    cs: bool,
    clk: bool,
    din: bool,
    dc: bool,
    rst_pulses: usize,
    waited_ns: u64,
    shift: u8,
    bits: u8,
    received: Vec<(u8, bool)>,
}

#[derive(Clone, Copy)]
enum Role {
    Cs,
    Clk,
    Din,
    Dc,
    Rst,
}

struct Pin {
    bus: Rc<RefCell<Bus>>,
    role: Role,
}

impl ErrorType for Pin {
    type Error = ErrorKind;
}

impl Pin {
    fn drive(&mut self, high: bool) {
        let mut bus = self.bus.borrow_mut();
        match self.role {
            Role::Cs => {
                bus.cs = high;
                if high {
                    bus.bits = 0;
                }
            }
            Role::Clk => {
                if high && !bus.clk && !bus.cs {
                    bus.shift = (bus.shift << 1) | u8::from(bus.din);
                    bus.bits += 1;
                    if bus.bits == 8 {
                        let byte = (bus.shift, bus.dc);
                        bus.received.push(byte);
                        bus.bits = 0;
                    }
                }
                bus.clk = high;
            }
            Role::Din => bus.din = high,
            Role::Dc => bus.dc = high,
            Role::Rst => {
                if !high {
                    bus.rst_pulses += 1;
                }
            }
        }
    }
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

struct Clock(Rc<RefCell<Bus>>);

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().waited_ns += u64::from(ns);
    }
}

type Wire = BitBangInterface<Pin, Pin, Pin, Pin, Pin, Clock>;

fn wire() -> (Rc<RefCell<Bus>>, Wire) {
    let bus = Rc::new(RefCell::new(Bus::default()));
    let pin = |role| Pin {
        bus: bus.clone(),
        role,
    };
    let interface = BitBangInterface::new(
        pin(Role::Cs),
        pin(Role::Clk),
        pin(Role::Din),
        pin(Role::Dc),
        Some(pin(Role::Rst)),
        Clock(bus.clone()),
    )
    .unwrap();
    (bus, interface)
}

#[test_log::test]
fn init_and_flush_over_gpio() {
    let (bus, interface) = wire();
    let mut display = Pcd8544::new(DisplayConfig::default()).unwrap();
    display.bind_transport(PinConfig::default(), interface).unwrap();
    display.initialize().unwrap();

    {
        let bus = bus.borrow();
        assert_eq!(bus.rst_pulses, 1);
        // 1 ms low, 10 ms to settle
        assert_eq!(bus.waited_ns, 11_000_000);
        assert_eq!(
            bus.received,
            [
                (0x21, false),
                (0xB8, false),
                (0x07, false),
                (0x14, false),
                (0x20, false),
                (0x0C, false),
            ]
        );
    }

    bus.borrow_mut().received.clear();
    // columns 0..=3, rows 0..=7
    display.draw_filled_rectangle(0, 0, 3, 8, true).unwrap();
    display.flush().unwrap();

    let bus = bus.borrow();
    assert_eq!(bus.received.len(), 2 + 504);
    assert_eq!(bus.received[..2], [(0x80, false), (0x40, false)]);
    let data: Vec<u8> = bus.received[2..].iter().map(|&(byte, _)| byte).collect();
    assert!(bus.received[2..].iter().all(|&(_, is_data)| is_data));
    assert_eq!(data[..5], [0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    assert_eq!(data, display.frame().bytes());
    assert!(bus.cs, "chip left selected after the transfer");
}
