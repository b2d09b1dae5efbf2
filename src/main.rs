//! Demo firmware: logs the board setup over the serial console, then plays a
//! 440Hz triangle wave on the audio pin.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use avr_device::interrupt::{self, Mutex};
    use core::cell::{Cell, RefCell};
    use panic_halt as _;
    use pwm_audio_synth::config::SAMPLE_RATE_HZ;
    use pwm_audio_synth::hal::{PacBus, Power, RegisterBus, Uart};
    use pwm_audio_synth::{resolve, Audio, Running, SerialConsole, Unconfigured};

    const TONE_HZ: u32 = 440;
    // 16-bit phase accumulator step per sample
    const PHASE_STEP: u16 = ((TONE_HZ << 16) / SAMPLE_RATE_HZ) as u16;

    // Global state shared with the overflow handler
    static AUDIO: Mutex<RefCell<Option<Audio<Running>>>> = Mutex::new(RefCell::new(None));
    static PHASE: Mutex<Cell<u16>> = Mutex::new(Cell::new(0));

    fn triangle(phase: u16) -> i8 {
        let p = (phase >> 8) as i16;
        let value = if p < 128 { 2 * p - 128 } else { 383 - 2 * p };
        value as i8
    }

    fn next_sample() {
        interrupt::free(|cs| {
            let phase = PHASE.borrow(cs);
            let p = phase.get().wrapping_add(PHASE_STEP);
            phase.set(p);

            if let Some(audio) = AUDIO.borrow(cs).borrow_mut().as_mut() {
                audio.write(triangle(p));
            }
        });
    }

    pwm_audio_synth::audio_interrupt!(next_sample);

    #[avr_device::entry]
    fn main() -> ! {
        let profile = resolve();

        // Safety: nothing else runs yet, and the overflow handler only ever
        // touches the duty register
        let mut console = SerialConsole::new(Uart::new(unsafe { PacBus::new() }, profile.console));
        console.write_line("PWM audio").ok();
        ufmt::uwriteln!(console, "{}\r", profile).ok();
        ufmt::uwriteln!(console, "Sample rate {} Hz, tone {} Hz\r", SAMPLE_RATE_HZ, TONE_HZ).ok();

        let audio = Audio::<Unconfigured>::new(unsafe { PacBus::new() }).begin();

        // Read the timer back to show what begin() left in it
        let regs = unsafe { PacBus::new() };
        for w in profile.timer.writes {
            console.debug(w.reg.name(), regs.read(w.reg)).ok();
        }
        console.flush().ok();

        interrupt::free(|cs| {
            AUDIO.borrow(cs).replace(Some(audio));
        });

        // Enable interrupts globally
        unsafe { interrupt::enable() };

        let mut power = Power::new(unsafe { PacBus::new() }, profile.sleep);
        loop {
            // Wake up on every overflow, the handler does the work
            power.enter_idle_mode();
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
