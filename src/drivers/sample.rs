//! Sample to duty cycle conversion.
//!
//! The PWM compare register takes an unsigned 8-bit duty cycle with 128 as
//! the zero line. Wider samples are clipped, never wrapped.

use ufmt::derive::uDebug;

/// One audio sample in any of the accepted representations.
#[derive(Clone, Copy, PartialEq, Eq, Debug, uDebug)]
pub enum Sample {
    Signed8(i8),
    /// Only 0..=255 is audible, larger values clip to full duty
    Unsigned16(u16),
    /// Only -128..=127 is audible, the rest clips
    Signed16(i16),
}

impl Sample {
    #[inline(always)]
    pub fn duty(self) -> u8 {
        match self {
            Sample::Signed8(s) => from_signed8(s),
            Sample::Unsigned16(s) => from_unsigned16(s),
            Sample::Signed16(s) => from_signed16(s),
        }
    }
}

impl From<i8> for Sample {
    fn from(s: i8) -> Self {
        Sample::Signed8(s)
    }
}

impl From<u16> for Sample {
    fn from(s: u16) -> Self {
        Sample::Unsigned16(s)
    }
}

impl From<i16> for Sample {
    fn from(s: i16) -> Self {
        Sample::Signed16(s)
    }
}

/// Bias a signed sample into 0..=255.
#[inline(always)]
pub const fn from_signed8(s: i8) -> u8 {
    (s as u8).wrapping_add(128)
}

#[inline(always)]
pub const fn from_unsigned16(s: u16) -> u8 {
    if s > 255 {
        255
    } else {
        s as u8
    }
}

#[inline(always)]
pub const fn from_signed16(s: i16) -> u8 {
    let clipped = if s > 127 {
        127
    } else if s < -128 {
        -128
    } else {
        s
    };
    from_signed8(clipped as i8)
}
