use embedded_hal::serial;
use ufmt::uWrite;

/// Text console on top of any blocking-capable serial writer.
///
/// Implements [`uWrite`] so `uwrite!`/`uwriteln!` can log through it.
pub struct SerialConsole<W: serial::Write<u8>> {
    serial: W,
}

impl<W: serial::Write<u8>> SerialConsole<W> {
    pub fn new(serial: W) -> Self {
        Self { serial }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), W::Error> {
        nb::block!(self.serial.write(byte))
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), W::Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    /// Two uppercase hex digits.
    pub fn write_hex(&mut self, val: u8) -> Result<(), W::Error> {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
        self.write_byte(DIGITS[(val >> 4) as usize])?;
        self.write_byte(DIGITS[(val & 0xF) as usize])
    }

    /// `name = 0xVV` on a line of its own, for register dumps.
    pub fn debug(&mut self, name: &str, val: u8) -> Result<(), W::Error> {
        self.write_str(name)?;
        self.write_str(" = 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }

    pub fn flush(&mut self) -> Result<(), W::Error> {
        nb::block!(self.serial.flush())
    }
}

impl<W: serial::Write<u8>> uWrite for SerialConsole<W> {
    type Error = W::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}
