//! ATmega168/328: Timer2 drives OC2B on PD3 (pin 3).

use super::{bv, Board, DutyRegister, HardwareProfile, HardwareVariant, InterruptId, SleepControl, UsartRegisters};
use crate::hal::gpio::Pin;
use crate::hal::register::{BitField, Register, RegisterWrite};
use crate::hal::timer::{Prescaler, PwmMode, TimerSetup};

// TCCR2A
const WGM20: u8 = 0;
const COM2B1: u8 = 5;
// TCCR2B
const CS20: u8 = 0;
// TIMSK2
const TOIE2: u8 = 0;

const TIMER_SETUP: [RegisterWrite; 3] = [
    // 31.25kHz phase correct PWM
    RegisterWrite::new(Register::Tccr2a, bv(COM2B1) | bv(WGM20)),
    RegisterWrite::new(Register::Tccr2b, bv(CS20)),
    RegisterWrite::new(Register::Timsk2, bv(TOIE2)),
];

pub struct Atmega328;

impl Board for Atmega328 {
    const PROFILE: HardwareProfile = HardwareProfile {
        variant: HardwareVariant::Atmega328,
        output_pin: Pin::new(3, b'D', 3, Register::Ddrd),
        duty: DutyRegister {
            reg: Register::Ocr2b,
            wide: false,
        },
        interrupt: InterruptId {
            name: "TIMER2_OVF",
            vector: 9,
        },
        timer: TimerSetup {
            mode: PwmMode::PhaseCorrect,
            prescaler: Prescaler::Direct,
            writes: &TIMER_SETUP,
        },
        compare_output: BitField::new(Register::Tccr2a, bv(COM2B1)),
        console: UsartRegisters {
            data: Register::Udr,
            status: Register::Ucsra,
            control: Register::Ucsrb,
            baud: Register::Ubrr,
            udre: bv(5),
            txen: bv(3),
        },
        sleep: SleepControl {
            reg: Register::Smcr,
            enable: bv(0),
            mode_mask: 0b0000_1110,
            idle: 0,
        },
    };
}

#[cfg(all(
    target_arch = "avr",
    not(any(audio_variant = "atmega8", audio_variant = "atmega1280"))
))]
mod pac {
    #[cfg(audio_chip = "atmega168")]
    use avr_device::atmega168 as chip;
    #[cfg(not(audio_chip = "atmega168"))]
    use avr_device::atmega328p as chip;

    use crate::hal::register::{PacBus, Register, RegisterBus};

    impl_register_bus! {
        bytes {
            Ddrd => PORTD.ddrd,
            Tccr2a => TC2.tccr2a,
            Tccr2b => TC2.tccr2b,
            Timsk2 => TC2.timsk2,
            Ocr2b => TC2.ocr2b,
            Smcr => CPU.smcr,
            Udr => USART0.udr0,
            Ucsra => USART0.ucsr0a,
            Ucsrb => USART0.ucsr0b,
        }
        words {
            Ubrr => USART0.ubrr0,
        }
        split {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer2_register_values() {
        let writes: Vec<_> = Atmega328::PROFILE
            .timer
            .writes
            .iter()
            .map(|w| (w.reg, w.value))
            .collect();
        assert_eq!(
            writes,
            [(Register::Tccr2a, 0x21), (Register::Tccr2b, 0x01), (Register::Timsk2, 0x01)]
        );
    }

    #[test]
    fn declared_mode_matches_timer2_bits() {
        let timer = Atmega328::PROFILE.timer;
        let tccr2a = timer.written(Register::Tccr2a);
        let tccr2b = timer.written(Register::Tccr2b);

        // WGM22 lives in TCCR2B bit 3
        let wgm = (tccr2a & 0b11) | ((tccr2b >> 1) & 0b100);
        let mode = match wgm {
            0b001 => Some(PwmMode::PhaseCorrect),
            0b011 => Some(PwmMode::Fast),
            _ => None,
        };
        assert_eq!(mode, Some(timer.mode));
        assert_eq!(Prescaler::from_timer2_cs(tccr2b), Some(timer.prescaler));
    }

    #[test]
    fn output_on_pd3() {
        let pin = Atmega328::PROFILE.output_pin;
        assert_eq!((pin.port, pin.bit, pin.ddr), (b'D', 3, Register::Ddrd));
        assert_eq!(Atmega328::PROFILE.duty.reg, Register::Ocr2b);
    }
}
