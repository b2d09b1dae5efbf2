//! Register access.
//!
//! Every driver in this crate goes through [`RegisterBus`] instead of touching
//! the chip directly. On the AVR target [`PacBus`] maps each [`Register`] onto
//! the `avr-device` register block of the selected chip; host tests use a
//! recording bus instead.

/// The registers the audio output, console and sleep code touch, across all
/// supported chips. Each chip only implements the ones it has.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Register {
    Ddrb,
    Ddrd,
    Ddre,
    Tccr2,
    Tccr2a,
    Tccr2b,
    Tccr3a,
    Tccr3b,
    Timsk,
    Timsk2,
    Timsk3,
    Ocr2,
    Ocr2b,
    /// 16-bit
    Ocr3c,
    Mcucr,
    Smcr,
    Udr,
    Ucsra,
    Ucsrb,
    /// 16-bit baud rate divisor
    Ubrr,
}

impl Register {
    pub const fn name(self) -> &'static str {
        match self {
            Register::Ddrb => "DDRB",
            Register::Ddrd => "DDRD",
            Register::Ddre => "DDRE",
            Register::Tccr2 => "TCCR2",
            Register::Tccr2a => "TCCR2A",
            Register::Tccr2b => "TCCR2B",
            Register::Tccr3a => "TCCR3A",
            Register::Tccr3b => "TCCR3B",
            Register::Timsk => "TIMSK",
            Register::Timsk2 => "TIMSK2",
            Register::Timsk3 => "TIMSK3",
            Register::Ocr2 => "OCR2",
            Register::Ocr2b => "OCR2B",
            Register::Ocr3c => "OCR3C",
            Register::Mcucr => "MCUCR",
            Register::Smcr => "SMCR",
            Register::Udr => "UDR",
            Register::Ucsra => "UCSRA",
            Register::Ucsrb => "UCSRB",
            Register::Ubrr => "UBRR",
        }
    }
}

/// A register/value pair, written as a whole.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterWrite {
    pub reg: Register,
    pub value: u8,
}

impl RegisterWrite {
    pub const fn new(reg: Register, value: u8) -> Self {
        Self { reg, value }
    }
}

/// One or more bits inside a register.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BitField {
    pub reg: Register,
    pub mask: u8,
}

impl BitField {
    pub const fn new(reg: Register, mask: u8) -> Self {
        Self { reg, mask }
    }

    pub fn set<R: RegisterBus>(self, bus: &mut R) {
        bus.modify(self.reg, |r| r | self.mask);
    }

    pub fn clear<R: RegisterBus>(self, bus: &mut R) {
        bus.modify(self.reg, |r| r & !self.mask);
    }
}

pub trait RegisterBus {
    /// Low byte of 16-bit registers.
    fn read(&self, reg: Register) -> u8;
    fn write(&mut self, reg: Register, value: u8);

    /// Write a 16-bit register, high byte first through the TEMP latch.
    fn write_wide(&mut self, reg: Register, value: u16);

    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Register, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
}

impl<R: RegisterBus> RegisterBus for &mut R {
    #[inline]
    fn read(&self, reg: Register) -> u8 {
        (**self).read(reg)
    }

    #[inline]
    fn write(&mut self, reg: Register, value: u8) {
        (**self).write(reg, value)
    }

    #[inline]
    fn write_wide(&mut self, reg: Register, value: u16) {
        (**self).write_wide(reg, value)
    }

    #[inline]
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Register, f: F) {
        (**self).modify(reg, f)
    }
}

/// The peripherals of the running chip, reached through its `avr-device`
/// register blocks. [`RegisterBus`] is implemented next to each board.
#[cfg(target_arch = "avr")]
pub struct PacBus {
    _private: (),
}

#[cfg(target_arch = "avr")]
impl PacBus {
    /// # Safety
    ///
    /// Several buses may exist at once. Callers must not touch the same
    /// register from two of them concurrently, the overflow handler included.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

/// Implements [`RegisterBus`] for [`PacBus`] with the register blocks of the
/// `chip` module in scope at the call site.
///
/// - `bytes`: 8-bit registers
/// - `words`: 16-bit registers
/// - `split`: 16-bit values spread over a high and a low byte register
#[cfg(target_arch = "avr")]
macro_rules! impl_register_bus {
    (
        bytes { $($reg:ident => $block:ident.$field:ident),* $(,)? }
        words { $($wreg:ident => $wblock:ident.$wfield:ident),* $(,)? }
        split { $($sreg:ident => $sblock:ident.($high:ident, $low:ident)),* $(,)? }
    ) => {
        impl RegisterBus for PacBus {
            #[inline(always)]
            fn read(&self, reg: Register) -> u8 {
                unsafe {
                    match reg {
                        $(Register::$reg => (*chip::$block::ptr()).$field.read().bits(),)*
                        $(Register::$wreg => (*chip::$wblock::ptr()).$wfield.read().bits() as u8,)*
                        $(Register::$sreg => (*chip::$sblock::ptr()).$low.read().bits(),)*
                        _ => 0,
                    }
                }
            }

            #[inline(always)]
            fn write(&mut self, reg: Register, value: u8) {
                unsafe {
                    match reg {
                        $(Register::$reg => (*chip::$block::ptr()).$field.write(|w| w.bits(value)),)*
                        $(Register::$wreg => (*chip::$wblock::ptr()).$wfield.write(|w| w.bits(value as u16)),)*
                        $(Register::$sreg => (*chip::$sblock::ptr()).$low.write(|w| w.bits(value)),)*
                        _ => {}
                    }
                }
            }

            #[inline(always)]
            fn write_wide(&mut self, reg: Register, value: u16) {
                unsafe {
                    match reg {
                        $(Register::$wreg => (*chip::$wblock::ptr()).$wfield.write(|w| w.bits(value)),)*
                        $(Register::$sreg => {
                            let p = chip::$sblock::ptr();
                            (*p).$high.write(|w| w.bits((value >> 8) as u8));
                            (*p).$low.write(|w| w.bits(value as u8));
                        })*
                        _ => self.write(reg, value as u8),
                    }
                }
            }

            #[inline(always)]
            fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Register, f: F) {
                unsafe {
                    match reg {
                        $(Register::$reg => (*chip::$block::ptr()).$field.modify(|r, w| w.bits(f(r.bits()))),)*
                        _ => {
                            let value = self.read(reg);
                            self.write(reg, f(value));
                        }
                    }
                }
            }
        }
    };
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{Register, RegisterBus};
    use std::vec::Vec;

    /// Register file that remembers every write in order. 8-bit writes are
    /// logged widened to `u16`.
    pub struct RecordingBus {
        regs: [u16; 32],
        pub writes: Vec<(Register, u16)>,
    }

    impl RecordingBus {
        pub fn new() -> Self {
            Self {
                regs: [0; 32],
                writes: Vec::new(),
            }
        }

        pub fn with(mut self, reg: Register, value: u8) -> Self {
            self.regs[reg as usize] = value as u16;
            self
        }

        pub fn peek(&self, reg: Register) -> u16 {
            self.regs[reg as usize]
        }

        pub fn registers(&self) -> &[u16; 32] {
            &self.regs
        }
    }

    impl RegisterBus for RecordingBus {
        fn read(&self, reg: Register) -> u8 {
            self.regs[reg as usize] as u8
        }

        fn write(&mut self, reg: Register, value: u8) {
            self.write_wide(reg, value as u16);
        }

        fn write_wide(&mut self, reg: Register, value: u16) {
            self.regs[reg as usize] = value;
            self.writes.push((reg, value));
        }
    }
}
