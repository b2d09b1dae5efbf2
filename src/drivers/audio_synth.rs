//! PWM audio output.
//!
//! The timer runs an 8-bit phase correct PWM carrier at `F_CPU / 510` and
//! raises its overflow interrupt once per carrier period. The handler bound
//! with [`audio_interrupt!`](crate::audio_interrupt) writes one sample per
//! interrupt; the compare unit picks the new duty up on the next period.
//!
//! ```ignore
//! let audio = AudioSynth::<SelectedBoard, _>::new(unsafe { PacBus::new() }).begin();
//! // from the overflow handler:
//! audio.write(sample);
//! ```

use super::sample::Sample;
use crate::hal::board::Board;
use crate::hal::register::RegisterBus;
use core::marker::PhantomData;

/// Timer not set up yet.
pub struct Unconfigured;
/// Carrier running, overflow interrupt enabled.
pub struct Running;

pub struct AudioSynth<B: Board, R: RegisterBus, S = Unconfigured> {
    bus: R,
    _board: PhantomData<B>,
    _state: PhantomData<S>,
}

impl<B: Board, R: RegisterBus> AudioSynth<B, R, Unconfigured> {
    pub fn new(bus: R) -> Self {
        Self {
            bus,
            _board: PhantomData,
            _state: PhantomData,
        }
    }

    /// Drive the output pin and start the PWM timer with its overflow
    /// interrupt. Interrupts still have to be enabled globally.
    pub fn begin(mut self) -> AudioSynth<B, R, Running> {
        configure::<B, R>(&mut self.bus);
        AudioSynth {
            bus: self.bus,
            _board: PhantomData,
            _state: PhantomData,
        }
    }
}

fn configure<B: Board, R: RegisterBus>(bus: &mut R) {
    let profile = B::PROFILE;
    profile.output_pin.into_output(bus);
    // Overflow interrupt enable is the last write of every setup
    profile.timer.apply(bus);
}

impl<B: Board, R: RegisterBus> AudioSynth<B, R, Running> {
    /// Output the next sample. Meant to be called once per overflow interrupt.
    #[inline(always)]
    pub fn write<S: Into<Sample>>(&mut self, sample: S) {
        self.write_duty(sample.into().duty());
    }

    #[inline(always)]
    pub fn write_signed8(&mut self, sample: i8) {
        self.write_duty(super::sample::from_signed8(sample));
    }

    #[inline(always)]
    pub fn write_unsigned16(&mut self, sample: u16) {
        self.write_duty(super::sample::from_unsigned16(sample));
    }

    #[inline(always)]
    pub fn write_signed16(&mut self, sample: i16) {
        self.write_duty(super::sample::from_signed16(sample));
    }

    #[inline(always)]
    fn write_duty(&mut self, duty: u8) {
        B::PROFILE.duty.write(&mut self.bus, duty);
    }

    /// Apply the timer setup again. Leaves the registers exactly as
    /// [`begin`](AudioSynth::begin) did.
    pub fn reconfigure(&mut self) {
        configure::<B, R>(&mut self.bus);
    }
}

impl<B: Board, R: RegisterBus> embedded_hal::PwmPin for AudioSynth<B, R, Running> {
    type Duty = u8;

    /// Reconnect the compare output to the pin.
    fn enable(&mut self) {
        B::PROFILE.compare_output.set(&mut self.bus);
    }

    /// Disconnect the pin from the compare unit. The timer and its interrupt
    /// keep running, so the sample clock is not disturbed.
    fn disable(&mut self) {
        B::PROFILE.compare_output.clear(&mut self.bus);
    }

    fn get_duty(&self) -> u8 {
        B::PROFILE.duty.read(&self.bus)
    }

    fn get_max_duty(&self) -> u8 {
        u8::MAX
    }

    fn set_duty(&mut self, duty: u8) {
        self.write_duty(duty);
    }
}
