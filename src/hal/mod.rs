#[macro_use]
pub mod register;

pub mod board;
pub mod gpio;
pub mod power;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use board::{resolve, Board, HardwareProfile, HardwareVariant, SelectedBoard};
pub use gpio::Pin;
pub use power::Power;
#[cfg(target_arch = "avr")]
pub use register::PacBus;
pub use register::{BitField, Register, RegisterBus, RegisterWrite};
pub use timer::{carrier_hz, Prescaler, PwmMode, TimerSetup};
pub use uart::Uart;
