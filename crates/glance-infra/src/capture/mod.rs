//! Audio capture through an external recorder process.

mod process;

pub use process::{CaptureConfig, ProcessAudioCapture};
