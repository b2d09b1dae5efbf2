//! 8-bit PWM audio output for ATmega8, ATmega1280 and ATmega168/328 boards.
//!
//! A hardware timer generates a ~31kHz PWM carrier on one pin and raises an
//! overflow interrupt every carrier period. Application code writes one sample
//! per interrupt and the duty cycle follows it. The board is fixed at build
//! time through Cargo features, see [`hal::board`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod hal;
pub mod interrupt;

pub use drivers::{AudioSynth, Running, Sample, SerialConsole, Unconfigured};
pub use hal::board::{resolve, Board, HardwareProfile, HardwareVariant, SelectedBoard};

/// The audio output of the selected board on real hardware.
#[cfg(target_arch = "avr")]
pub type Audio<S = Unconfigured> = AudioSynth<SelectedBoard, hal::PacBus, S>;

#[cfg(test)]
#[path = "../build/variant.rs"]
mod build_variant;
