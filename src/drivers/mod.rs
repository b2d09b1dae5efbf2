pub mod audio_synth;
pub mod sample;
pub mod serial_console;

pub use audio_synth::{AudioSynth, Running, Unconfigured};
pub use sample::{from_signed16, from_signed8, from_unsigned16, Sample};
pub use serial_console::SerialConsole;
