//! Per-chip register layouts.
//!
//! Exactly one board is selected at build time (see `build.rs`); the others
//! stay compiled so their profiles can be inspected on any build.

mod atmega1280;
mod atmega328;
mod atmega8;

pub use atmega1280::Atmega1280;
pub use atmega328::Atmega328;
pub use atmega8::Atmega8;

use super::gpio::Pin;
use super::register::{BitField, Register, RegisterBus};
use super::timer::TimerSetup;
use ufmt::derive::uDebug;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum HardwareVariant {
    /// Old ATmega8 boards
    Atmega8,
    /// Arduino Mega
    Atmega1280,
    /// ATmega168/328 boards, and anything unrecognized
    Atmega328,
}

/// Timer overflow interrupt driving the sample clock.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InterruptId {
    pub name: &'static str,
    pub vector: u8,
}

/// Output compare register holding the duty cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DutyRegister {
    pub reg: Register,
    /// 16-bit compare register, written with a zero high byte
    pub wide: bool,
}

impl DutyRegister {
    #[inline(always)]
    pub fn write<R: RegisterBus>(&self, bus: &mut R, duty: u8) {
        if self.wide {
            bus.write_wide(self.reg, duty as u16);
        } else {
            bus.write(self.reg, duty);
        }
    }

    #[inline]
    pub fn read<R: RegisterBus>(&self, bus: &R) -> u8 {
        bus.read(self.reg)
    }
}

/// Registers of the USART used for the serial console.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UsartRegisters {
    pub data: Register,
    pub status: Register,
    pub control: Register,
    /// 12-bit baud rate divisor
    pub baud: Register,
    /// Data register empty flag in `status`
    pub udre: u8,
    /// Transmitter enable bit in `control`
    pub txen: u8,
}

/// Sleep mode select and enable bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SleepControl {
    pub reg: Register,
    pub enable: u8,
    pub mode_mask: u8,
    /// Value of the mode bits selecting idle sleep
    pub idle: u8,
}

#[derive(Clone, Copy, Debug)]
pub struct HardwareProfile {
    pub variant: HardwareVariant,
    pub output_pin: Pin,
    pub duty: DutyRegister,
    pub interrupt: InterruptId,
    pub timer: TimerSetup,
    /// COM bits connecting the compare output to `output_pin`
    pub compare_output: BitField,
    pub console: UsartRegisters,
    pub sleep: SleepControl,
}

impl uDisplay for HardwareProfile {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let pin = &self.output_pin;
        uwrite!(
            f,
            "{:?}: pin {} (P{}{}), duty {}, {} (vector {})",
            self.variant,
            pin.arduino,
            pin.port as char,
            pin.bit,
            self.duty.reg.name(),
            self.interrupt.name,
            self.interrupt.vector
        )
    }
}

/// A supported chip, described entirely at compile time.
pub trait Board {
    const PROFILE: HardwareProfile;
}

#[cfg(audio_variant = "atmega8")]
pub type SelectedBoard = Atmega8;
#[cfg(audio_variant = "atmega1280")]
pub type SelectedBoard = Atmega1280;
#[cfg(not(any(audio_variant = "atmega8", audio_variant = "atmega1280")))]
pub type SelectedBoard = Atmega328;

/// Profile of the board this build targets.
#[inline(always)]
pub const fn resolve() -> HardwareProfile {
    SelectedBoard::PROFILE
}

/// `1 << bit`, for spelling register values the way the datasheet does.
pub(crate) const fn bv(bit: u8) -> u8 {
    1 << bit
}
