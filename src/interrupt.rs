//! Binding the sample clock to application code.
//!
//! Once [`AudioSynth::begin`](crate::drivers::AudioSynth::begin) has run and
//! interrupts are enabled, the timer overflows at
//! [`SAMPLE_RATE_HZ`](crate::config::SAMPLE_RATE_HZ). Register a handler for
//! that overflow with [`audio_interrupt!`](crate::audio_interrupt):
//!
//! ```ignore
//! fn next_sample() {
//!     // write exactly one sample before the next overflow
//! }
//!
//! pwm_audio_synth::audio_interrupt!(next_sample);
//! ```
//!
//! The handler runs with interrupts disabled and has one carrier period
//! (about 32us at 16MHz) to finish. Overrunning it glitches the audio, nothing
//! else. On the AVR target the macro expands to an `avr-device` interrupt
//! handler, so the calling crate needs `avr-device` and
//! `#![feature(abi_avr_interrupt)]`. Elsewhere it expands to a plain function
//! named after the vector, which tests call to simulate an overflow.

use crate::hal::board::{resolve, InterruptId};

/// Overflow interrupt of the selected board.
pub const OVERFLOW_INTERRUPT: InterruptId = resolve().interrupt;

#[doc(hidden)]
#[cfg(target_arch = "avr")]
#[macro_export]
macro_rules! __bind_vector {
    ($chip:ident, $vector:ident, $handler:path) => {
        #[::avr_device::interrupt($chip)]
        fn $vector() {
            let handler: fn() = $handler;
            handler();
        }
    };
}

#[doc(hidden)]
#[cfg(not(target_arch = "avr"))]
#[macro_export]
macro_rules! __bind_vector {
    ($chip:ident, $vector:ident, $handler:path) => {
        #[allow(non_snake_case)]
        pub fn $vector() {
            let handler: fn() = $handler;
            handler();
        }
    };
}

/// Run `handler` on every timer overflow of the selected board.
#[cfg(audio_chip = "atmega8")]
#[macro_export]
macro_rules! audio_interrupt {
    ($handler:path) => {
        $crate::__bind_vector!(atmega8, TIMER2_OVF, $handler);
    };
}

/// Run `handler` on every timer overflow of the selected board.
#[cfg(audio_chip = "atmega1280")]
#[macro_export]
macro_rules! audio_interrupt {
    ($handler:path) => {
        $crate::__bind_vector!(atmega1280, TIMER3_OVF, $handler);
    };
}

/// Run `handler` on every timer overflow of the selected board.
#[cfg(audio_chip = "atmega168")]
#[macro_export]
macro_rules! audio_interrupt {
    ($handler:path) => {
        $crate::__bind_vector!(atmega168, TIMER2_OVF, $handler);
    };
}

/// Run `handler` on every timer overflow of the selected board.
#[cfg(not(any(audio_chip = "atmega8", audio_chip = "atmega1280", audio_chip = "atmega168")))]
#[macro_export]
macro_rules! audio_interrupt {
    ($handler:path) => {
        $crate::__bind_vector!(atmega328p, TIMER2_OVF, $handler);
    };
}
