//! ATmega1280 (Arduino Mega): Timer3 drives OC3C on PE5 (pin 3).

use super::{bv, Board, DutyRegister, HardwareProfile, HardwareVariant, InterruptId, SleepControl, UsartRegisters};
use crate::hal::gpio::Pin;
use crate::hal::register::{BitField, Register, RegisterWrite};
use crate::hal::timer::{Prescaler, PwmMode, TimerSetup};

// TCCR3A
const WGM30: u8 = 0;
const COM3C1: u8 = 3;
// TCCR3B
const CS30: u8 = 0;
// TIMSK3
const TOIE3: u8 = 0;

const TIMER_SETUP: [RegisterWrite; 3] = [
    // WGM3 = 0b0001: phase correct 8-bit PWM on a 16-bit timer
    RegisterWrite::new(Register::Tccr3a, bv(COM3C1) | bv(WGM30)),
    RegisterWrite::new(Register::Tccr3b, bv(CS30)),
    RegisterWrite::new(Register::Timsk3, bv(TOIE3)),
];

pub struct Atmega1280;

impl Board for Atmega1280 {
    const PROFILE: HardwareProfile = HardwareProfile {
        variant: HardwareVariant::Atmega1280,
        output_pin: Pin::new(3, b'E', 5, Register::Ddre),
        duty: DutyRegister {
            reg: Register::Ocr3c,
            wide: true,
        },
        interrupt: InterruptId {
            name: "TIMER3_OVF",
            vector: 35,
        },
        timer: TimerSetup {
            mode: PwmMode::PhaseCorrect,
            prescaler: Prescaler::Direct,
            writes: &TIMER_SETUP,
        },
        compare_output: BitField::new(Register::Tccr3a, bv(COM3C1)),
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

#[cfg(all(target_arch = "avr", audio_variant = "atmega1280"))]
mod pac {
    use avr_device::atmega1280 as chip;

    use crate::hal::register::{PacBus, Register, RegisterBus};

    impl_register_bus! {
        bytes {
            Ddre => PORTE.ddre,
            Tccr3a => TC3.tccr3a,
            Tccr3b => TC3.tccr3b,
            Timsk3 => TC3.timsk3,
            Smcr => CPU.smcr,
            Udr => USART0.udr0,
            Ucsra => USART0.ucsr0a,
            Ucsrb => USART0.ucsr0b,
        }
        words {
            Ocr3c => TC3.ocr3c,
            Ubrr => USART0.ubrr0,
        }
        split {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer3_register_values() {
        let writes: Vec<_> = Atmega1280::PROFILE
            .timer
            .writes
            .iter()
            .map(|w| (w.reg, w.value))
            .collect();
        assert_eq!(
            writes,
            [(Register::Tccr3a, 0x09), (Register::Tccr3b, 0x01), (Register::Timsk3, 0x01)]
        );
    }

    #[test]
    fn declared_mode_matches_timer3_bits() {
        let timer = Atmega1280::PROFILE.timer;
        let tccr3a = timer.written(Register::Tccr3a);
        let tccr3b = timer.written(Register::Tccr3b);

        // WGM33:32 live in TCCR3B bits 4:3
        let wgm = (tccr3a & 0b11) | ((tccr3b >> 1) & 0b1100);
        let mode = match wgm {
            0b0001 => Some(PwmMode::PhaseCorrect),
            0b0101 => Some(PwmMode::Fast),
            _ => None,
        };
        assert_eq!(mode, Some(timer.mode));
        assert_eq!(Prescaler::from_cs(tccr3b), Some(timer.prescaler));
    }

    #[test]
    fn duty_is_sixteen_bit_ocr3c() {
        let duty = Atmega1280::PROFILE.duty;
        assert_eq!(duty, DutyRegister { reg: Register::Ocr3c, wide: true });
        assert_eq!(Atmega1280::PROFILE.output_pin.ddr, Register::Ddre);
    }
}
