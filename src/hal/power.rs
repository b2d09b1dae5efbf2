use super::board::SleepControl;
use super::register::RegisterBus;

/// Idle sleep between interrupts. Timers keep running in idle mode, so the
/// PWM carrier and the sample interrupt are unaffected.
pub struct Power<R: RegisterBus> {
    bus: R,
    ctrl: SleepControl,
}

impl<R: RegisterBus> Power<R> {
    pub fn new(bus: R, ctrl: SleepControl) -> Self {
        Self { bus, ctrl }
    }

    #[inline]
    pub fn set_idle_mode(&mut self) {
        let ctrl = self.ctrl;
        self.bus
            .modify(ctrl.reg, |r| (r & !ctrl.mode_mask) | (ctrl.idle & ctrl.mode_mask));
    }

    #[inline]
    pub fn enable_sleep(&mut self) {
        let enable = self.ctrl.enable;
        self.bus.modify(self.ctrl.reg, |r| r | enable);
    }

    #[inline]
    pub fn disable_sleep(&mut self) {
        let enable = self.ctrl.enable;
        self.bus.modify(self.ctrl.reg, |r| r & !enable);
    }

    #[inline]
    fn sleep(&mut self) {
        #[cfg(target_arch = "avr")]
        avr_device::asm::sleep();
    }

    /// Sleep until the next interrupt.
    pub fn enter_idle_mode(&mut self) {
        self.set_idle_mode();
        self.enable_sleep();
        self.sleep();
        self.disable_sleep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::board::{Atmega328, Atmega8, Board};
    use crate::hal::register::mock::RecordingBus;
    use crate::hal::register::Register;

    #[test]
    fn idle_on_smcr() {
        // Power-down (SM = 0b010) left over from earlier
        let mut bus = RecordingBus::new().with(Register::Smcr, 0b0000_0100);
        Power::new(&mut bus, Atmega328::PROFILE.sleep).enter_idle_mode();

        assert_eq!(
            bus.writes,
            [(Register::Smcr, 0x00), (Register::Smcr, 0x01), (Register::Smcr, 0x00)]
        );
    }

    #[test]
    fn idle_on_atmega8_mcucr_keeps_interrupt_sense_bits() {
        let mut bus = RecordingBus::new().with(Register::Mcucr, 0b0010_0011);
        Power::new(&mut bus, Atmega8::PROFILE.sleep).enter_idle_mode();

        assert_eq!(
            bus.writes,
            [(Register::Mcucr, 0x03), (Register::Mcucr, 0x83), (Register::Mcucr, 0x03)]
        );
    }
}
