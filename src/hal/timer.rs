use super::register::{RegisterBus, RegisterWrite};

/// Clock select, as the divider applied to the CPU clock.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Prescaler {
    Direct = 1,
    Div8 = 8,
    Div64 = 64,
    Div256 = 256,
    Div1024 = 1024,
}

impl Prescaler {
    #[inline]
    pub const fn divider(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
impl Prescaler {
    /// Decode the CS bits of Timer0/1/3.
    pub(crate) fn from_cs(cs: u8) -> Option<Self> {
        match cs & 0x07 {
            1 => Some(Prescaler::Direct),
            2 => Some(Prescaler::Div8),
            3 => Some(Prescaler::Div64),
            4 => Some(Prescaler::Div256),
            5 => Some(Prescaler::Div1024),
            _ => None,
        }
    }

    /// Decode the CS bits of the asynchronous Timer2, which also has /32 and
    /// /128 (not representable here).
    pub(crate) fn from_timer2_cs(cs: u8) -> Option<Self> {
        match cs & 0x07 {
            1 => Some(Prescaler::Direct),
            2 => Some(Prescaler::Div8),
            4 => Some(Prescaler::Div64),
            6 => Some(Prescaler::Div256),
            7 => Some(Prescaler::Div1024),
            _ => None,
        }
    }
}

/// 8-bit PWM waveform generation modes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PwmMode {
    /// Counts 0..=255, overflow once per 256 ticks.
    Fast,
    /// Counts up then down, overflow at BOTTOM once per 510 ticks.
    PhaseCorrect,
}

impl PwmMode {
    #[inline]
    pub const fn ticks_per_period(self) -> u32 {
        match self {
            PwmMode::Fast => 256,
            PwmMode::PhaseCorrect => 510,
        }
    }
}

/// PWM carrier frequency, which is also the overflow interrupt rate.
pub const fn carrier_hz(cpu_hz: u32, mode: PwmMode, prescaler: Prescaler) -> u32 {
    cpu_hz / (prescaler.divider() * mode.ticks_per_period())
}

/// Ordered list of control register writes bringing a timer up.
#[derive(Clone, Copy, Debug)]
pub struct TimerSetup {
    pub mode: PwmMode,
    pub prescaler: Prescaler,
    pub writes: &'static [RegisterWrite],
}

#[cfg(test)]
impl TimerSetup {
    /// Value this setup writes to `reg`, or 0 if it leaves it alone.
    pub(crate) fn written(&self, reg: super::register::Register) -> u8 {
        self.writes
            .iter()
            .rev()
            .find(|w| w.reg == reg)
            .map_or(0, |w| w.value)
    }
}

impl TimerSetup {
    /// Write every control register in order. The values replace the
    /// previous contents, so applying the same setup twice is a no-op.
    pub fn apply<R: RegisterBus>(&self, bus: &mut R) {
        for w in self.writes {
            bus.write(w.reg, w.value);
        }
    }
}
