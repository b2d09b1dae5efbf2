use super::register::{Register, RegisterBus};

/// A single port pin, named both by its board label and its port bit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pin {
    /// Number printed on the Arduino header
    pub arduino: u8,
    /// Port letter, b'B' for PB3
    pub port: u8,
    pub bit: u8,
    pub ddr: Register,
}

impl Pin {
    pub const fn new(arduino: u8, port: u8, bit: u8, ddr: Register) -> Self {
        Self { arduino, port, bit, ddr }
    }

    #[inline]
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }

    /// Set the DDRx bit, leaving the other pins of the port untouched.
    pub fn into_output<R: RegisterBus>(&self, bus: &mut R) {
        let mask = self.mask();
        bus.modify(self.ddr, |r| r | mask);
    }
}
