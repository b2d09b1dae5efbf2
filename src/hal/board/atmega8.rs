//! ATmega8: Timer2 drives OC2 on PB3 (pin 11).

use super::{bv, Board, DutyRegister, HardwareProfile, HardwareVariant, InterruptId, SleepControl, UsartRegisters};
use crate::hal::gpio::Pin;
use crate::hal::register::{BitField, Register, RegisterWrite};
use crate::hal::timer::{Prescaler, PwmMode, TimerSetup};

// TCCR2
const CS20: u8 = 0;
const COM21: u8 = 5;
const WGM20: u8 = 6;
// TIMSK
const TOIE2: u8 = 6;

const TIMER_SETUP: [RegisterWrite; 2] = [
    // Phase correct 8-bit PWM, clear OC2 on up-count match, no prescaling
    RegisterWrite::new(Register::Tccr2, bv(WGM20) | bv(COM21) | bv(CS20)),
    RegisterWrite::new(Register::Timsk, bv(TOIE2)),
];

pub struct Atmega8;

impl Board for Atmega8 {
    const PROFILE: HardwareProfile = HardwareProfile {
        variant: HardwareVariant::Atmega8,
        output_pin: Pin::new(11, b'B', 3, Register::Ddrb),
        duty: DutyRegister {
            reg: Register::Ocr2,
            wide: false,
        },
        interrupt: InterruptId {
            name: "TIMER2_OVF",
            vector: 4,
        },
        timer: TimerSetup {
            mode: PwmMode::PhaseCorrect,
            prescaler: Prescaler::Direct,
            writes: &TIMER_SETUP,
        },
        compare_output: BitField::new(Register::Tccr2, bv(COM21)),
        console: UsartRegisters {
            data: Register::Udr,
            status: Register::Ucsra,
            control: Register::Ucsrb,
            baud: Register::Ubrr,
            udre: bv(5),
            txen: bv(3),
        },
        sleep: SleepControl {
            reg: Register::Mcucr,
            enable: bv(7),
            mode_mask: 0b0111_0000,
            idle: 0,
        },
    };
}

#[cfg(all(target_arch = "avr", audio_variant = "atmega8"))]
mod pac {
    use avr_device::atmega8 as chip;

    use crate::hal::register::{PacBus, Register, RegisterBus};

    impl_register_bus! {
        bytes {
            Ddrb => PORTB.ddrb,
            Tccr2 => TC2.tccr2,
            Ocr2 => TC2.ocr2,
            Timsk => TC2.timsk,
            Mcucr => CPU.mcucr,
            Udr => USART.udr,
            Ucsra => USART.ucsra,
            Ucsrb => USART.ucsrb,
        }
        words {}
        // UBRRH shares its address with UCSRC; URSEL (bit 7) stays clear
        // as long as the divisor fits in 12 bits
        split {
            Ubrr => USART.(ubrrh, ubrrl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer2_register_values() {
        let writes: Vec<_> = Atmega8::PROFILE
            .timer
            .writes
            .iter()
            .map(|w| (w.reg, w.value))
            .collect();
        assert_eq!(writes, [(Register::Tccr2, 0x61), (Register::Timsk, 0x40)]);
    }

    #[test]
    fn declared_mode_matches_tccr2_bits() {
        let timer = Atmega8::PROFILE.timer;
        let tccr2 = timer.written(Register::Tccr2);

        // WGM21 is bit 3, WGM20 bit 6
        let wgm = ((tccr2 >> 6) & 0b01) | ((tccr2 >> 2) & 0b10);
        let mode = match wgm {
            0b01 => Some(PwmMode::PhaseCorrect),
            0b11 => Some(PwmMode::Fast),
            _ => None,
        };
        assert_eq!(mode, Some(timer.mode));
        assert_eq!(Prescaler::from_timer2_cs(tccr2), Some(timer.prescaler));
    }

    #[test]
    fn output_on_pb3() {
        let pin = Atmega8::PROFILE.output_pin;
        assert_eq!((pin.port, pin.bit, pin.ddr), (b'B', 3, Register::Ddrb));
        assert_eq!(Atmega8::PROFILE.duty, DutyRegister { reg: Register::Ocr2, wide: false });
    }
}
