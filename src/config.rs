//! Configuration constants for the PWM audio output

use crate::hal::board::resolve;
use crate::hal::timer::carrier_hz;

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Serial console baud rate
pub const CONSOLE_BAUD: u32 = 9600;

/// Overflow interrupt rate of the selected board, one sample per interrupt.
/// 31372 Hz at 16MHz.
pub const SAMPLE_RATE_HZ: u32 = {
    let timer = resolve().timer;
    carrier_hz(CPU_FREQ_HZ, timer.mode, timer.prescaler)
};

/// USART baud rate register value for normal (U2X = 0) speed.
pub const fn ubrr(baud: u32) -> u16 {
    (CPU_FREQ_HZ / (16 * baud) - 1) as u16
}
