use super::board::UsartRegisters;
use super::register::RegisterBus;
use crate::config::{ubrr, CONSOLE_BAUD};
use core::convert::Infallible;
use embedded_hal::serial;

/// Transmit-only, polled USART.
///
/// Nothing here runs from an interrupt, so the audio ISR never waits on it.
pub struct Uart<R: RegisterBus> {
    bus: R,
    regs: UsartRegisters,
}

impl<R: RegisterBus> Uart<R> {
    /// Set the baud rate and enable the transmitter. Frame format is left at
    /// the reset default of 8N1.
    pub fn new(mut bus: R, regs: UsartRegisters) -> Self {
        bus.write_wide(regs.baud, ubrr(CONSOLE_BAUD) & 0x0FFF);
        bus.modify(regs.control, |r| r | regs.txen);

        Self { bus, regs }
    }

    #[inline]
    fn data_register_empty(&self) -> bool {
        self.bus.read(self.regs.status) & self.regs.udre != 0
    }
}

impl<R: RegisterBus> serial::Write<u8> for Uart<R> {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if !self.data_register_empty() {
            return Err(nb::Error::WouldBlock);
        }
        self.bus.write(self.regs.data, byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.data_register_empty() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::board::{Atmega328, Atmega8, Board};
    use crate::hal::register::mock::RecordingBus;
    use crate::hal::register::Register;
    use embedded_hal::serial::Write;

    #[test]
    fn init_programs_9600_baud() {
        let mut bus = RecordingBus::new().with(Register::Ucsrb, 0x80);
        Uart::new(&mut bus, Atmega328::PROFILE.console);

        // RXCIE left alone, TXEN set
        assert_eq!(bus.writes, [(Register::Ubrr, 103), (Register::Ucsrb, 0x88)]);
    }

    #[test]
    fn atmega8_divisor_keeps_ursel_clear() {
        let mut bus = RecordingBus::new();
        Uart::new(&mut bus, Atmega8::PROFILE.console);
        assert_eq!(bus.peek(Register::Ubrr) & 0x8000, 0);
        assert_eq!(bus.peek(Register::Ubrr), 103);
    }

    #[test]
    fn write_blocks_until_data_register_empty() {
        let regs = Atmega328::PROFILE.console;
        let mut uart = Uart::new(RecordingBus::new(), regs);

        assert_eq!(uart.write(b'A'), Err(nb::Error::WouldBlock));
        assert_eq!(uart.flush(), Err(nb::Error::WouldBlock));

        let mut bus = RecordingBus::new().with(Register::Ucsra, 0x20);
        let mut uart = Uart::new(&mut bus, regs);
        assert_eq!(uart.write(b'A'), Ok(()));
        assert_eq!(uart.flush(), Ok(()));
        assert_eq!(bus.peek(Register::Udr), b'A' as u16);
    }
}
